//! # Tripflow Core
//!
//! Core traits and types for the Tripflow reducer architecture.
//!
//! This crate provides the fundamental abstractions for building session-scoped
//! state machines using the Reducer pattern.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (user input, collaborator results)
//! - **Reducer**: Pure function `(State, Action, Environment) → Effects`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use tripflow_core::{Effect, Reducer, SmallVec, smallvec};
//!
//! #[derive(Clone, Debug)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Self::State,
//!         action: Self::Action,
//!         _env: &Self::Environment,
//!     ) -> SmallVec<[Effect<Self::Action>; 4]> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 smallvec![Effect::None]
//!             }
//!         }
//!     }
//! }
//! ```

pub mod effect;
pub mod environment;
pub mod reducer;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use effect::Effect;
pub use environment::{Clock, SystemClock};
pub use reducer::Reducer;
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};
