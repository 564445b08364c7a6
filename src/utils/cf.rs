use std::ffi::{c_char, c_void, CStr, CString};
use std::marker::PhantomData;

use super::ffi::*;
use crate::error::{Error, Result};

/// An owned CoreFoundation reference, released with `CFRelease` exactly once.
#[derive(Debug)]
pub struct CfOwned(CFTypeRef);

impl CfOwned {
    /// Takes ownership of a reference obtained under the Create/Copy rule.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a valid CoreFoundation object whose +1 reference is transferred to the returned value.
    pub unsafe fn from_create(ptr: CFTypeRef) -> Option<Self> {
        if ptr.is_null() {
            None
        } else {
            Some(Self(ptr))
        }
    }

    pub fn as_ptr(&self) -> CFTypeRef {
        self.0
    }
}

impl Drop for CfOwned {
    fn drop(&mut self) {
        unsafe { CFRelease(self.0) }
    }
}

/// Creates a `CFString` from a Rust string.
pub fn cf_string(s: &str) -> Result<CfOwned> {
    let c_str = CString::new(s).map_err(|_| Error::invalid_data(format!("interior NUL in {:?}", s)))?;
    let ptr = unsafe { CFStringCreateWithCString(kCFAllocatorDefault, c_str.as_ptr(), kCFStringEncodingUTF8) };
    unsafe { CfOwned::from_create(ptr) }.ok_or_else(|| Error::system("CFStringCreateWithCString"))
}

/// Borrowed, type-checked view of a `CFDictionary` with string keys.
#[derive(Debug, Clone, Copy)]
pub struct CfDictionary<'a> {
    ptr: CFDictionaryRef,
    _owner: PhantomData<&'a CfOwned>,
}

impl<'a> CfDictionary<'a> {
    /// Wraps `ptr` if it is a non-null `CFDictionary`.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a valid CoreFoundation object that outlives `'a`.
    pub unsafe fn wrap(ptr: CFTypeRef) -> Option<Self> {
        if ptr.is_null() || CFGetTypeID(ptr) != CFDictionaryGetTypeID() {
            return None;
        }
        Some(Self { ptr, _owner: PhantomData })
    }

    fn value_of_type(&self, key: &str, type_id: CFTypeID) -> Option<CFTypeRef> {
        let key = cf_string(key).ok()?;
        let value = unsafe { CFDictionaryGetValue(self.ptr, key.as_ptr()) };
        if value.is_null() || unsafe { CFGetTypeID(value) } != type_id {
            return None;
        }
        Some(value)
    }

    pub fn get_number_property(&self, key: &str) -> Option<f64> {
        let number = self.value_of_type(key, unsafe { CFNumberGetTypeID() })?;
        let mut value = 0.0f64;
        let ok = unsafe { CFNumberGetValue(number, kCFNumberDoubleType, &mut value as *mut f64 as *mut c_void) };
        (ok != 0).then_some(value)
    }

    pub fn get_i64_property(&self, key: &str) -> Option<i64> {
        let number = self.value_of_type(key, unsafe { CFNumberGetTypeID() })?;
        let mut value = 0i64;
        let ok = unsafe { CFNumberGetValue(number, kCFNumberSInt64Type, &mut value as *mut i64 as *mut c_void) };
        (ok != 0).then_some(value)
    }

    pub fn get_bool_property(&self, key: &str) -> Option<bool> {
        let boolean = self.value_of_type(key, unsafe { CFBooleanGetTypeID() })?;
        Some(unsafe { CFBooleanGetValue(boolean) } != 0)
    }

    pub fn get_string_property(&self, key: &str) -> Option<String> {
        let string = self.value_of_type(key, unsafe { CFStringGetTypeID() })?;
        let mut buffer = [0 as c_char; 256];
        let ok = unsafe {
            CFStringGetCString(string, buffer.as_mut_ptr(), buffer.len() as CFIndex, kCFStringEncodingUTF8)
        };
        if ok == 0 {
            return None;
        }
        let c_str = unsafe { CStr::from_ptr(buffer.as_ptr()) };
        Some(c_str.to_string_lossy().into_owned())
    }

    /// Nested dictionary, borrowed from the same owner.
    pub fn get_dict_property(&self, key: &str) -> Option<CfDictionary<'a>> {
        let dict = self.value_of_type(key, unsafe { CFDictionaryGetTypeID() })?;
        Some(Self { ptr: dict, _owner: PhantomData })
    }
}
