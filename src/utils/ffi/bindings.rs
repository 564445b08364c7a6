//! Raw bindings to the Mach, IOKit, IOPowerSources and CoreFoundation APIs used by the macOS backends.
//!
//! Everything here is a direct `extern "C"` declaration or a `#[repr(C)]` mirror of a system header. Ownership rules
//! follow the Create/Copy/Get convention of the underlying frameworks; safe owning wrappers live in
//! [`crate::iokit`] and the platform backends.

#![allow(non_camel_case_types, non_upper_case_globals)]

use std::os::raw::{c_char, c_int, c_void};

//------------------------------------------------------------------------------
// Mach
//------------------------------------------------------------------------------

pub type kern_return_t = c_int;
pub type natural_t = u32;
pub type integer_t = i32;
pub type mach_port_t = natural_t;
pub type host_t = mach_port_t;
pub type mach_msg_type_number_t = natural_t;
pub type processor_info_array_t = *mut integer_t;
pub type vm_address_t = usize;
pub type vm_size_t = usize;

pub const KERN_SUCCESS: kern_return_t = 0;

/// `processor_flavor_t` for per-core tick counters
pub const PROCESSOR_CPU_LOAD_INFO: c_int = 2;

/// Index of each state inside one core's `cpu_ticks` array
pub const CPU_STATE_USER: usize = 0;
pub const CPU_STATE_SYSTEM: usize = 1;
pub const CPU_STATE_IDLE: usize = 2;
pub const CPU_STATE_NICE: usize = 3;
pub const CPU_STATE_MAX: usize = 4;

pub const HOST_VM_INFO64: c_int = 4;
/// `sizeof(vm_statistics64_data_t) / sizeof(integer_t)`
pub const HOST_VM_INFO64_COUNT: mach_msg_type_number_t =
    (std::mem::size_of::<vm_statistics64>() / std::mem::size_of::<integer_t>()) as mach_msg_type_number_t;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct vm_statistics64 {
    pub free_count: natural_t,
    pub active_count: natural_t,
    pub inactive_count: natural_t,
    pub wire_count: natural_t,
    pub zero_fill_count: u64,
    pub reactivations: u64,
    pub pageins: u64,
    pub pageouts: u64,
    pub faults: u64,
    pub cow_faults: u64,
    pub lookups: u64,
    pub hits: u64,
    pub purges: u64,
    pub purgeable_count: natural_t,
    pub speculative_count: natural_t,
    pub decompressions: u64,
    pub compressions: u64,
    pub swapins: u64,
    pub swapouts: u64,
    pub compressor_page_count: natural_t,
    pub throttled_count: natural_t,
    pub external_page_count: natural_t,
    pub internal_page_count: natural_t,
    pub total_uncompressed_pages_in_compressor: u64,
}

extern "C" {
    pub static mach_task_self_: mach_port_t;
    pub static vm_kernel_page_size: vm_size_t;

    pub fn mach_host_self() -> host_t;

    pub fn host_processor_info(
        host: host_t,
        flavor: c_int,
        out_processor_count: *mut natural_t,
        out_processor_info: *mut processor_info_array_t,
        out_processor_info_count: *mut mach_msg_type_number_t,
    ) -> kern_return_t;

    pub fn host_statistics64(
        host_priv: host_t,
        flavor: c_int,
        host_info_out: *mut integer_t,
        host_info_out_count: *mut mach_msg_type_number_t,
    ) -> kern_return_t;

    pub fn vm_deallocate(target_task: mach_port_t, address: vm_address_t, size: vm_size_t) -> kern_return_t;
}

//------------------------------------------------------------------------------
// CoreFoundation
//------------------------------------------------------------------------------

pub type Boolean = u8;
pub type CFIndex = isize;
pub type CFTypeID = usize;
pub type CFTypeRef = *const c_void;
pub type CFAllocatorRef = *const c_void;
pub type CFStringRef = *const c_void;
pub type CFNumberRef = *const c_void;
pub type CFBooleanRef = *const c_void;
pub type CFArrayRef = *const c_void;
pub type CFDictionaryRef = *const c_void;
pub type CFMutableDictionaryRef = *mut c_void;
pub type CFStringEncoding = u32;
pub type CFNumberType = CFIndex;

pub const kCFAllocatorDefault: CFAllocatorRef = std::ptr::null();
pub const kCFStringEncodingUTF8: CFStringEncoding = 0x0800_0100;
pub const kCFNumberSInt64Type: CFNumberType = 4;
pub const kCFNumberDoubleType: CFNumberType = 13;

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    pub fn CFRelease(cf: CFTypeRef);
    pub fn CFGetTypeID(cf: CFTypeRef) -> CFTypeID;

    pub fn CFStringGetTypeID() -> CFTypeID;
    pub fn CFStringCreateWithCString(
        alloc: CFAllocatorRef,
        c_str: *const c_char,
        encoding: CFStringEncoding,
    ) -> CFStringRef;
    pub fn CFStringGetCString(
        the_string: CFStringRef,
        buffer: *mut c_char,
        buffer_size: CFIndex,
        encoding: CFStringEncoding,
    ) -> Boolean;

    pub fn CFNumberGetTypeID() -> CFTypeID;
    pub fn CFNumberGetValue(number: CFNumberRef, the_type: CFNumberType, value_ptr: *mut c_void) -> Boolean;

    pub fn CFBooleanGetTypeID() -> CFTypeID;
    pub fn CFBooleanGetValue(boolean: CFBooleanRef) -> Boolean;

    pub fn CFDictionaryGetTypeID() -> CFTypeID;
    pub fn CFDictionaryGetValue(the_dict: CFDictionaryRef, key: *const c_void) -> *const c_void;

    pub fn CFArrayGetCount(the_array: CFArrayRef) -> CFIndex;
    pub fn CFArrayGetValueAtIndex(the_array: CFArrayRef, idx: CFIndex) -> *const c_void;
}

//------------------------------------------------------------------------------
// IOKit
//------------------------------------------------------------------------------

pub type io_object_t = mach_port_t;
pub type io_iterator_t = io_object_t;
pub type io_service_t = io_object_t;
pub type IOOptionBits = u32;

/// `kIOMainPortDefault` (`MACH_PORT_NULL`)
pub const K_IOMAIN_PORT_DEFAULT: mach_port_t = 0;

#[link(name = "IOKit", kind = "framework")]
extern "C" {
    pub fn IOServiceMatching(name: *const c_char) -> CFMutableDictionaryRef;
    /// Consumes one reference on `matching`.
    pub fn IOServiceGetMatchingServices(
        main_port: mach_port_t,
        matching: CFDictionaryRef,
        existing: *mut io_iterator_t,
    ) -> kern_return_t;
    pub fn IOIteratorNext(iterator: io_iterator_t) -> io_object_t;
    pub fn IOObjectRelease(object: io_object_t) -> kern_return_t;
    pub fn IORegistryEntryCreateCFProperties(
        entry: io_object_t,
        properties: *mut CFMutableDictionaryRef,
        allocator: CFAllocatorRef,
        options: IOOptionBits,
    ) -> kern_return_t;

    pub fn IOPSCopyPowerSourcesInfo() -> CFTypeRef;
    pub fn IOPSCopyPowerSourcesList(blob: CFTypeRef) -> CFArrayRef;
    /// Returned dictionary is owned by `blob`; do not release.
    pub fn IOPSGetPowerSourceDescription(blob: CFTypeRef, ps: CFTypeRef) -> CFDictionaryRef;
}

//------------------------------------------------------------------------------
// Metal
//------------------------------------------------------------------------------

#[link(name = "Metal", kind = "framework")]
extern "C" {
    /// Returns a +1 retained `id<MTLDevice>`, or nil.
    pub fn MTLCreateSystemDefaultDevice() -> *mut objc2::runtime::AnyObject;
}
