pub mod auto_close;
pub mod shutdown;

pub use auto_close::AutoClosePlugin;
pub use shutdown::ShutdownPlugin;
