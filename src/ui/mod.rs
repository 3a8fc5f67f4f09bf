//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: terminal setup, the event loop, and key handling.
//! - [`renderer`]: draws the sidebar, transcript, prompt and footer.
//! - [`theme`]: light and dark palettes.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns domain logic and backend coordination.

pub mod chat_loop;
pub mod renderer;
pub mod theme;
