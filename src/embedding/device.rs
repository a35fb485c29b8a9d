use candle_core::Device;
use tracing::{debug, warn};

use super::error::EmbeddingError;

/// Picks the compute device for the sentence encoder.
///
/// GPU backends are tried only when compiled in (`metal` / `cuda` features);
/// any failure falls back to the CPU.
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[cfg(any(feature = "metal", feature = "cuda"))]
    let mut attempts: Vec<String> = Vec::new();
    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    let attempts: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                tracing::info!("Sentence encoder using Metal");
                return Ok(device);
            }
            Err(e) => {
                warn!(error = %e, "Metal device unavailable");
                attempts.push(format!("metal: {e}"));
            }
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                tracing::info!("Sentence encoder using CUDA");
                return Ok(device);
            }
            Err(e) => {
                warn!(error = %e, "CUDA device unavailable");
                attempts.push(format!("cuda: {e}"));
            }
        }
    }

    if attempts.is_empty() {
        debug!("No GPU backend compiled, using CPU");
    } else {
        warn!(reason = %attempts.join("; "), "Falling back to CPU device");
    }
    Ok(Device::Cpu)
}
