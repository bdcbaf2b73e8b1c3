//! Instance details reported back to the caller.
//!
//! [`InstanceDetails`] is filled in by an implementation when an instance is initialized
//! (see [`crate::InstanceRegistry::initialize_instance`]) and read by the caller afterwards.
//! It carries the number of the resource the instance runs on and the flags describing it.
//!
//! # Examples
//!
//! ```rust
//! use hmsbeagle::InstanceDetails;
//!
//! let mut details = InstanceDetails::new();
//! details.set_resource_number(3);
//! details.set_flags(0x10);
//!
//! assert_eq!(details.resource_number(), 3);
//! assert_eq!(details.flags(), 16);
//! ```

/// Information about a particular instance as reported by the API.
///
/// Both fields start at zero and hold whatever was last written. The flags are an opaque
/// bit-set; this type never interprets individual bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InstanceDetails {
    resource_number: i32,
    flags: u64,
}

impl InstanceDetails {
    /// Create details with a resource number and flags of zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of the resource the instance runs on.
    #[must_use]
    pub fn resource_number(&self) -> i32 {
        self.resource_number
    }

    /// Set the resource number.
    pub fn set_resource_number(&mut self, resource_number: i32) {
        self.resource_number = resource_number;
    }

    /// Flags describing the capabilities or status of the resource.
    #[must_use]
    pub fn flags(&self) -> u64 {
        self.flags
    }

    /// Set the flags.
    pub fn set_flags(&mut self, flags: u64) {
        self.flags = flags;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_zero() {
        let details = InstanceDetails::new();
        assert_eq!(details.resource_number(), 0);
        assert_eq!(details.flags(), 0);
        assert_eq!(details, InstanceDetails::default());
    }

    #[test]
    fn stores_what_was_set() {
        let mut details = InstanceDetails::new();

        for value in [i32::MIN, -1, 0, 1, 42, i32::MAX] {
            details.set_resource_number(value);
            assert_eq!(details.resource_number(), value);
        }

        for value in [0, 1, 0x10, 0x8000_0000_0000_0000, u64::MAX] {
            details.set_flags(value);
            assert_eq!(details.flags(), value);
        }
    }

    #[test]
    fn fields_are_independent() {
        let mut details = InstanceDetails::new();

        details.set_flags(u64::MAX);
        assert_eq!(details.resource_number(), 0);

        details.set_resource_number(-7);
        assert_eq!(details.flags(), u64::MAX);

        details.set_flags(0);
        assert_eq!(details.resource_number(), -7);
    }

    #[test]
    fn last_write_wins() {
        let mut details = InstanceDetails::new();

        details.set_resource_number(5);
        details.set_resource_number(2);
        assert_eq!(details.resource_number(), 2);

        details.set_flags(0xFF);
        details.set_flags(0x01);
        assert_eq!(details.flags(), 0x01);
    }

    #[test]
    fn copies_are_detached() {
        let mut original = InstanceDetails::new();
        original.set_resource_number(1);

        let mut copy = original;
        copy.set_resource_number(9);
        copy.set_flags(4);

        assert_eq!(original.resource_number(), 1);
        assert_eq!(original.flags(), 0);
        assert_eq!(copy.resource_number(), 9);
    }
}
