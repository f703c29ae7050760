//! GPU presentation.
//!
//! The canvas is rendered on the CPU; the GPU side only uploads the finished
//! frame into the swapchain texture and presents it.

mod error;
mod init;
mod presenter;
mod surface;

pub use error::SurfaceErrorAction;
pub use init::GpuInit;
pub use presenter::Presenter;
pub use surface::UploadLayout;
