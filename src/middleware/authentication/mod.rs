mod getheader;
pub mod jwt;
mod manager;
mod manager_middleware;
mod method;

pub use getheader::*;
pub use manager::*;
pub use manager_middleware::*;
