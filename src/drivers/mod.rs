//! Hardware drivers — one-shot peripheral bring-up and the GPIO helpers
//! used by the main loop.

pub mod hw_init;
