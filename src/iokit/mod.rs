//! IOKit handles: the GPU accelerator service and the power source enumeration.
//!
//! Every IOKit object acquired here is owned by an [`IoObject`] and released exactly once when it is dropped.

use std::ffi::CString;
use std::ptr;

use tracing::debug;

use crate::battery::constants::keys;
use crate::battery::{PowerSourceInfo, PowerSourceProvider};
use crate::error::{Error, Result};
use crate::gpu::UtilizationCounter;
use crate::utils::ffi::*;
use crate::utils::{CfDictionary, CfOwned};

/// IOKit class of GPU accelerator services
pub const ACCELERATOR_SERVICE: &str = "IOAccelerator";

/// Property dictionary holding driver performance counters
pub const PERFORMANCE_STATISTICS: &str = "PerformanceStatistics";

/// Renderer utilization counter inside [`PERFORMANCE_STATISTICS`]
pub const RENDERER_UTILIZATION: &str = "Renderer Utilization %";

/// An owned IOKit object reference.
#[derive(Debug)]
pub struct IoObject(io_object_t);

impl IoObject {
    /// Takes ownership of `object`; 0 (`IO_OBJECT_NULL`) yields `None`.
    fn from_raw(object: io_object_t) -> Option<Self> {
        (object != 0).then_some(Self(object))
    }

    /// Copies the registry entry's properties into a new dictionary.
    pub fn properties(&self) -> Result<CfOwned> {
        let mut props: CFMutableDictionaryRef = ptr::null_mut();
        let kr = unsafe { IORegistryEntryCreateCFProperties(self.0, &mut props, kCFAllocatorDefault, 0) };
        if kr != KERN_SUCCESS {
            return Err(Error::kern("IORegistryEntryCreateCFProperties", kr));
        }
        unsafe { CfOwned::from_create(props as CFTypeRef) }
            .ok_or_else(|| Error::system("IORegistryEntryCreateCFProperties returned no dictionary"))
    }
}

impl Drop for IoObject {
    fn drop(&mut self) {
        unsafe { IOObjectRelease(self.0) };
    }
}

/// First registered service of `class_name`, or `None` when there is none.
pub fn first_matching_service(class_name: &str) -> Result<Option<IoObject>> {
    let name = CString::new(class_name).map_err(|_| Error::invalid_data("service name contains NUL"))?;

    let matching = unsafe { IOServiceMatching(name.as_ptr()) };
    if matching.is_null() {
        return Err(Error::system("IOServiceMatching"));
    }

    let mut iterator: io_iterator_t = 0;
    // Consumes `matching`
    let kr = unsafe { IOServiceGetMatchingServices(K_IOMAIN_PORT_DEFAULT, matching, &mut iterator) };
    if kr != KERN_SUCCESS {
        return Err(Error::kern("IOServiceGetMatchingServices", kr));
    }

    let Some(iterator) = IoObject::from_raw(iterator) else {
        return Ok(None);
    };
    Ok(IoObject::from_raw(unsafe { IOIteratorNext(iterator.0) }))
}

/// Handle to the first GPU accelerator, held for the sampler's lifetime.
#[derive(Debug)]
pub struct AcceleratorHandle {
    service: IoObject,
}

impl AcceleratorHandle {
    /// Acquires the first `IOAccelerator` service. `Ok(None)` means the machine has no accelerator.
    pub fn open() -> Result<Option<Self>> {
        Ok(first_matching_service(ACCELERATOR_SERVICE)?.map(|service| Self { service }))
    }
}

impl UtilizationCounter for AcceleratorHandle {
    fn utilization(&self) -> Result<Option<f64>> {
        let props = self.service.properties()?;
        let dict = unsafe { CfDictionary::wrap(props.as_ptr()) }
            .ok_or_else(|| Error::invalid_data("accelerator properties are not a dictionary"))?;

        Ok(dict
            .get_dict_property(PERFORMANCE_STATISTICS)
            .and_then(|stats| stats.get_number_property(RENDERER_UTILIZATION)))
    }
}

/// Power source enumeration through IOPowerSources.
#[derive(Debug, Default)]
pub struct IoPowerSources;

impl IoPowerSources {
    pub fn new() -> Self {
        Self
    }

    fn describe(description: CfDictionary<'_>) -> PowerSourceInfo {
        PowerSourceInfo {
            name: description.get_string_property(keys::NAME).unwrap_or_default(),
            current_capacity: description.get_i64_property(keys::CURRENT_CAPACITY),
            max_capacity: description.get_i64_property(keys::MAX_CAPACITY),
            is_charging: description.get_bool_property(keys::IS_CHARGING).unwrap_or(false),
        }
    }
}

impl PowerSourceProvider for IoPowerSources {
    fn power_sources(&self) -> Result<Vec<PowerSourceInfo>> {
        let blob = unsafe { CfOwned::from_create(IOPSCopyPowerSourcesInfo()) }
            .ok_or_else(|| Error::system("IOPSCopyPowerSourcesInfo"))?;
        let list = unsafe { CfOwned::from_create(IOPSCopyPowerSourcesList(blob.as_ptr())) }
            .ok_or_else(|| Error::system("IOPSCopyPowerSourcesList"))?;

        let count = unsafe { CFArrayGetCount(list.as_ptr()) };
        let sources: Vec<PowerSourceInfo> = (0..count)
            .filter_map(|index| {
                let source = unsafe { CFArrayGetValueAtIndex(list.as_ptr(), index) };
                // Owned by `blob`
                let description = unsafe { CfDictionary::wrap(IOPSGetPowerSourceDescription(blob.as_ptr(), source)) }?;
                Some(Self::describe(description))
            })
            .collect();

        debug!(count = sources.len(), "enumerated power sources");
        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_service_class_is_none() {
        let service = first_matching_service("HostSamplerNoSuchServiceClass").unwrap();
        assert!(service.is_none());
    }

    #[test]
    #[cfg_attr(feature = "skip-ffi-crashes", ignore)]
    fn test_accelerator_reading_in_range() {
        if let Some(handle) = AcceleratorHandle::open().unwrap() {
            if let Some(value) = handle.utilization().unwrap() {
                assert!(value >= 0.0);
            }
        }
    }

    #[test]
    fn test_power_sources_enumerate() {
        for source in IoPowerSources::new().power_sources().unwrap() {
            if let Some(percent) = source.charge_percentage() {
                assert!(percent >= 0.0);
            }
        }
    }
}
