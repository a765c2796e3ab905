//! Native Geräte-Quelle auf cpal-Basis
//!
//! Auf nativen Plattformen gibt es keinen Freigabe-Dialog; die Anfrage
//! gilt als erteilt, sobald überhaupt ein Eingabegerät existiert.

use super::{AudioDeviceSource, AudioInputDevice, DeviceError};
use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait};

/// Auflistung der Audio-Eingabegeräte über den cpal-Host
#[derive(Debug, Default)]
pub struct CpalDeviceSource;

impl CpalDeviceSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioDeviceSource for CpalDeviceSource {
    async fn request_access(&self) -> Result<(), DeviceError> {
        let host = cpal::default_host();
        if host.default_input_device().is_none() {
            return Err(DeviceError::NoDevice);
        }
        Ok(())
    }

    async fn list_inputs(&self) -> Result<Vec<AudioInputDevice>, DeviceError> {
        let host = cpal::default_host();
        let default_name = host.default_input_device().and_then(|d| d.name().ok());

        let devices = host
            .input_devices()
            .map_err(|e| DeviceError::Enumeration(e.to_string()))?
            .filter_map(|d| d.name().ok())
            .map(|name| AudioInputDevice {
                is_default: Some(&name) == default_name.as_ref(),
                device_id: name.clone(),
                label: name,
            })
            .collect();

        Ok(devices)
    }
}
