mod export;
mod requests;
mod responses;

pub use export::*;
pub use requests::*;
pub use responses::*;
