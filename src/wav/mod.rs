mod convert;
pub use convert::*;
mod decode;
pub use decode::*;
mod wav;
pub use wav::*;
mod write;
pub use write::*;
