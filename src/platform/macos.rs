//! macOS backends: Mach host statistics and Metal command-queue timing.
//!
//! IOKit-based backends (accelerator counter, power sources) live in [`crate::iokit`].

use std::mem;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::slice;
use std::time::Duration;

use objc2::msg_send;
use objc2::rc::{autoreleasepool, Retained};
use objc2::runtime::AnyObject;
use once_cell::sync::Lazy;

use crate::cpu::{CoreTicks, CpuTickSource};
use crate::error::{Error, Result};
use crate::gpu::CommandQueueTimer;
use crate::memory::{VmStatistics, VmStatsSource};
use crate::utils::ffi::*;

/// Send right to the host port, acquired once per process.
static HOST: Lazy<host_t> = Lazy::new(|| unsafe { mach_host_self() });

/// Per-core tick counters from `host_processor_info`.
#[derive(Debug, Default)]
pub struct MachProcessorTicks;

impl MachProcessorTicks {
    pub fn new() -> Self {
        Self
    }
}

impl CpuTickSource for MachProcessorTicks {
    fn processor_ticks(&self) -> Result<Vec<CoreTicks>> {
        let mut cpu_count: natural_t = 0;
        let mut info: processor_info_array_t = ptr::null_mut();
        let mut info_count: mach_msg_type_number_t = 0;

        let kr = unsafe {
            host_processor_info(*HOST, PROCESSOR_CPU_LOAD_INFO, &mut cpu_count, &mut info, &mut info_count)
        };
        if kr != KERN_SUCCESS {
            return Err(Error::kern("host_processor_info", kr));
        }
        if info.is_null() {
            return Err(Error::system("host_processor_info returned no buffer"));
        }

        // The kernel allocated the buffer in our address space; hand it back however we leave.
        let info = scopeguard::guard(info, |info| unsafe {
            vm_deallocate(
                mach_task_self_,
                info as vm_address_t,
                info_count as vm_size_t * mem::size_of::<integer_t>(),
            );
        });

        let len = (cpu_count as usize * CPU_STATE_MAX).min(info_count as usize);
        let raw = unsafe { slice::from_raw_parts(*info, len) };

        // Counters are natural_t stored in an integer_t array
        let tick = |core: &[integer_t], state: usize| core[state] as u32 as u64;
        Ok(raw
            .chunks_exact(CPU_STATE_MAX)
            .map(|core| {
                CoreTicks::new(
                    tick(core, CPU_STATE_USER),
                    tick(core, CPU_STATE_SYSTEM),
                    tick(core, CPU_STATE_NICE),
                    tick(core, CPU_STATE_IDLE),
                )
            })
            .collect())
    }
}

/// Page counts from `host_statistics64` and physical memory from `hw.memsize`.
#[derive(Debug, Default)]
pub struct MachVmStats;

impl MachVmStats {
    pub fn new() -> Self {
        Self
    }
}

impl VmStatsSource for MachVmStats {
    fn vm_statistics(&self) -> Result<VmStatistics> {
        let mut stats = vm_statistics64::default();
        let mut count = HOST_VM_INFO64_COUNT;

        let kr = unsafe {
            host_statistics64(*HOST, HOST_VM_INFO64, &mut stats as *mut vm_statistics64 as *mut integer_t, &mut count)
        };
        if kr != KERN_SUCCESS {
            return Err(Error::kern("host_statistics64", kr));
        }

        Ok(VmStatistics {
            free: stats.free_count as u64,
            active: stats.active_count as u64,
            inactive: stats.inactive_count as u64,
            wired: stats.wire_count as u64,
            compressed: stats.compressor_page_count as u64,
            page_size: unsafe { vm_kernel_page_size } as u64,
        })
    }

    fn physical_memory(&self) -> Result<u64> {
        let mut memsize: u64 = 0;
        let mut size = mem::size_of::<u64>();
        let name = b"hw.memsize\0";

        let rc = unsafe {
            libc::sysctlbyname(
                name.as_ptr() as *const c_char,
                &mut memsize as *mut u64 as *mut c_void,
                &mut size,
                ptr::null_mut(),
                0,
            )
        };
        if rc != 0 {
            return Err(Error::Io(std::io::Error::last_os_error()));
        }
        Ok(memsize)
    }
}

/// Times an empty command buffer on the default Metal device.
pub struct MetalCommandQueueTimer {
    _device: Retained<AnyObject>,
    queue: Retained<AnyObject>,
}

// SAFETY: MTLDevice and MTLCommandQueue are thread-safe, and the sampler never uses the timer from two threads at
// once.
unsafe impl Send for MetalCommandQueueTimer {}

impl MetalCommandQueueTimer {
    /// Opens the system default device and a command queue on it. `None` when Metal has no device.
    pub fn open() -> Option<Self> {
        autoreleasepool(|_| unsafe {
            let device = Retained::from_raw(MTLCreateSystemDefaultDevice())?;
            let queue: Option<Retained<AnyObject>> = msg_send![&*device, newCommandQueue];
            Some(Self { _device: device, queue: queue? })
        })
    }
}

impl CommandQueueTimer for MetalCommandQueueTimer {
    fn time_noop_submission(&self) -> Result<Duration> {
        autoreleasepool(|_| unsafe {
            let buffer: Option<Retained<AnyObject>> = msg_send![&*self.queue, commandBuffer];
            let buffer = buffer.ok_or_else(|| Error::system("commandBuffer returned nil"))?;

            let _: () = msg_send![&*buffer, commit];
            let _: () = msg_send![&*buffer, waitUntilCompleted];

            let start: f64 = msg_send![&*buffer, GPUStartTime];
            let end: f64 = msg_send![&*buffer, GPUEndTime];
            let busy = end - start;
            if !busy.is_finite() || busy < 0.0 {
                return Err(Error::invalid_data(format!("GPU timestamps out of order: {} -> {}", start, end)));
            }
            Ok(Duration::from_secs_f64(busy))
        })
    }
}

impl std::fmt::Debug for MetalCommandQueueTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetalCommandQueueTimer").finish_non_exhaustive()
    }
}
