//! EFI status shaped errors for host-interface seams
//!
//! Host services (the SMBIOS manager, serial transports) report failures as UEFI status
//! codes. [`EfiError`] is the typed subset the platform components care about, convertible
//! to and from `r_efi::efi::Status` at the FFI boundary.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!

use r_efi::efi;

/// Errors surfaced by host services and transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfiError {
    /// A parameter was incorrect for the requested operation
    InvalidParameter,
    /// The operation is not supported by this host or hardware
    Unsupported,
    /// The supplied buffer is too small for the result
    BufferTooSmall,
    /// The service is not ready to perform the operation
    NotReady,
    /// A hardware error occurred while performing the operation
    DeviceError,
    /// A required resource could not be allocated
    OutOfResources,
    /// The requested item was not found
    NotFound,
    /// The device did not respond within the expected window
    NoResponse,
    /// The operation timed out
    Timeout,
    /// The operation was aborted
    Aborted,
}

impl EfiError {
    /// Maps a raw UEFI status to a `Result`.
    ///
    /// `SUCCESS` (and warning statuses, which clear the error bit) map to `Ok(())`;
    /// error statuses map to the matching variant, with `DeviceError` as the catch-all
    /// for codes this crate does not model individually.
    pub fn status_to_result(status: efi::Status) -> Result<()> {
        match status {
            efi::Status::SUCCESS => Ok(()),
            efi::Status::INVALID_PARAMETER => Err(EfiError::InvalidParameter),
            efi::Status::UNSUPPORTED => Err(EfiError::Unsupported),
            efi::Status::BUFFER_TOO_SMALL => Err(EfiError::BufferTooSmall),
            efi::Status::NOT_READY => Err(EfiError::NotReady),
            efi::Status::OUT_OF_RESOURCES => Err(EfiError::OutOfResources),
            efi::Status::NOT_FOUND => Err(EfiError::NotFound),
            efi::Status::NO_RESPONSE => Err(EfiError::NoResponse),
            efi::Status::TIMEOUT => Err(EfiError::Timeout),
            efi::Status::ABORTED => Err(EfiError::Aborted),
            status if status.is_error() => Err(EfiError::DeviceError),
            _ => Ok(()),
        }
    }
}

impl From<EfiError> for efi::Status {
    fn from(error: EfiError) -> Self {
        match error {
            EfiError::InvalidParameter => efi::Status::INVALID_PARAMETER,
            EfiError::Unsupported => efi::Status::UNSUPPORTED,
            EfiError::BufferTooSmall => efi::Status::BUFFER_TOO_SMALL,
            EfiError::NotReady => efi::Status::NOT_READY,
            EfiError::DeviceError => efi::Status::DEVICE_ERROR,
            EfiError::OutOfResources => efi::Status::OUT_OF_RESOURCES,
            EfiError::NotFound => efi::Status::NOT_FOUND,
            EfiError::NoResponse => efi::Status::NO_RESPONSE,
            EfiError::Timeout => efi::Status::TIMEOUT,
            EfiError::Aborted => efi::Status::ABORTED,
        }
    }
}

/// Convenience alias for seam results.
pub type Result<T> = core::result::Result<T, EfiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_maps_to_ok() {
        assert_eq!(EfiError::status_to_result(efi::Status::SUCCESS), Ok(()));
    }

    #[test]
    fn test_known_errors_round_trip() {
        extern crate std;
        use std::vec;

        let errors = vec![
            EfiError::InvalidParameter,
            EfiError::Unsupported,
            EfiError::BufferTooSmall,
            EfiError::NotReady,
            EfiError::OutOfResources,
            EfiError::NotFound,
            EfiError::NoResponse,
            EfiError::Timeout,
            EfiError::Aborted,
        ];

        for err in errors {
            let status: efi::Status = err.into();
            assert_eq!(EfiError::status_to_result(status), Err(err));
        }
    }

    #[test]
    fn test_unmodeled_error_is_device_error() {
        assert_eq!(EfiError::status_to_result(efi::Status::CRC_ERROR), Err(EfiError::DeviceError));
    }

    #[test]
    fn test_device_error_status() {
        let status: efi::Status = EfiError::DeviceError.into();
        assert_eq!(status, efi::Status::DEVICE_ERROR);
    }
}
