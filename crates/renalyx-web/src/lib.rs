//! renalyx-web: HTTP host for the CKD prediction pipeline.
//! Provides:
//!   - Input form
//!   - Prediction result page
//!   - PDF report download (label-only or full inputs)
//!   - Health probe

pub mod router;
pub mod handlers;
pub mod state;
pub mod error;
