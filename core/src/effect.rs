//! Side effect descriptions.
//!
//! Effects describe side effects to be performed by the runtime.
//! They are plain values; the store decides when and how to run them.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Effect type - describes a side effect to be executed
///
/// Effects are NOT executed immediately. They are descriptions of what should
/// happen, returned from reducers and executed by the Store runtime.
///
/// # Type Parameters
///
/// - `Action`: The action type that effects can produce (feedback loop)
#[allow(missing_docs)]
pub enum Effect<Action> {
    /// No-op effect
    None,

    /// Run effects in parallel
    Parallel(Vec<Effect<Action>>),

    /// Run effects sequentially
    Sequential(Vec<Effect<Action>>),

    /// Delayed action (for timeouts, simulated processing)
    Delay {
        /// How long to wait
        duration: Duration,
        /// Action to dispatch after delay
        action: Box<Action>,
    },

    /// Arbitrary async computation
    ///
    /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Parallel(effects) => f.debug_tuple("Effect::Parallel").field(effects).finish(),
            Effect::Sequential(effects) => {
                f.debug_tuple("Effect::Sequential").field(effects).finish()
            },
            Effect::Delay { duration, action } => f
                .debug_struct("Effect::Delay")
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
        }
    }
}
