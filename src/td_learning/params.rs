//! Hyperparameters for TD agents

use serde::{Deserialize, Serialize};

use crate::{Error, Result, tictactoe::Player};

/// Learning configuration of a [`TdAgent`](super::TdAgent).
///
/// # Examples
///
/// ```
/// use td_tictactoe::td_learning::TdParams;
/// use td_tictactoe::tictactoe::Player;
///
/// let params = TdParams::default().with_draw_rewards(0.6, 0.4);
/// assert_eq!(params.draw_reward(Player::O), 0.4);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdParams {
    /// Learning rate α, in (0, 1]
    pub alpha: f64,
    /// Exploration rate ε, in [0, 1]
    pub epsilon: f64,
    /// Value of a drawn game for the agent playing X
    pub x_draw_reward: f64,
    /// Value of a drawn game for the agent playing O
    pub o_draw_reward: f64,
}

impl TdParams {
    pub const DEFAULT_ALPHA: f64 = 0.1;
    pub const DEFAULT_EPSILON: f64 = 0.1;
    pub const DEFAULT_DRAW_REWARD: f64 = 0.5;

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_draw_rewards(mut self, x_draw_reward: f64, o_draw_reward: f64) -> Self {
        self.x_draw_reward = x_draw_reward;
        self.o_draw_reward = o_draw_reward;
        self
    }

    /// Draw reward for the agent seated on `side`
    pub fn draw_reward(&self, side: Player) -> f64 {
        match side {
            Player::X => self.x_draw_reward,
            Player::O => self.o_draw_reward,
        }
    }

    /// Check every parameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return invalid(format!("alpha {} must be in (0, 1]", self.alpha));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return invalid(format!("epsilon {} must be in [0, 1]", self.epsilon));
        }
        for (name, reward) in [
            ("x_draw_reward", self.x_draw_reward),
            ("o_draw_reward", self.o_draw_reward),
        ] {
            if !(0.0..=1.0).contains(&reward) {
                return invalid(format!("{name} {reward} must be in [0, 1]"));
            }
        }
        Ok(())
    }
}

impl Default for TdParams {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            epsilon: Self::DEFAULT_EPSILON,
            x_draw_reward: Self::DEFAULT_DRAW_REWARD,
            o_draw_reward: Self::DEFAULT_DRAW_REWARD,
        }
    }
}
