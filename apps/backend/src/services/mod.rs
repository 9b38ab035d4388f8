//! Services layered over the repositories.

pub mod qr_code_view;

pub use qr_code_view::QrCodeViewModel;
