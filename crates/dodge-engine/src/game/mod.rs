//! The dodge game proper: particle geometry, the per-frame field step and the
//! running/stopped controller. Nothing here touches the browser.

pub mod engine;
pub mod particles;
pub mod state;
