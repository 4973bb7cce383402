mod fft;
pub use fft::*;
mod mask;
pub use mask::*;
mod spectrum;
pub use spectrum::*;
