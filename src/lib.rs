//! Brick-wall FFT low-pass filtering for short audio clips.
//!
//! Audio is decoded into mono samples ([`wav::load_audio`]), transformed with a DFT
//! ([`spectral::forward`]), masked above a cutoff ([`spectral::low_pass`]) and brought back
//! to the time domain ([`spectral::inverse`]). [`pipeline::Pipeline`] wires those stages
//! to a [`plot::Visualizer`] and a [`wav::AudioWriter`].

pub mod config;
pub mod pipeline;
pub mod plot;
pub mod spectral;
pub mod utils;
pub mod wav;
