//! Sentinel providers.
//!
//! A [`Sentinel`] decides which value of `V` means "no entry" in a slot. The
//! map never stores a presence flag next to a value, so exactly one value of
//! the domain has to be given up for this purpose.

/// Supplies the reserved "empty" value for slots of type `V`.
pub trait Sentinel<V> {
    /// Produce the sentinel used to fill newly created slots.
    fn empty(&self) -> V;

    /// Whether `value` is the sentinel.
    fn is_empty(&self, value: &V) -> bool;
}

/// Sentinel chosen by the caller at construction time and kept in the map.
///
/// `V` must be `Eq`: a sentinel that is not equal to itself would make every
/// empty slot read as occupied. Floats are rejected for that reason.
///
/// ```compile_fail
/// use sentinel_map::SentinelMap;
///
/// let _ = SentinelMap::new(f64::NAN);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stored<V>(
    /// The reserved value.
    pub V,
);

impl<V: Clone + Eq> Sentinel<V> for Stored<V> {
    #[inline]
    fn empty(&self) -> V {
        self.0.clone()
    }

    #[inline]
    fn is_empty(&self, value: &V) -> bool {
        *value == self.0
    }
}

/// The maximum value of an unsigned primitive.
///
/// Zero-sized: the comparison is against a constant rather than a field, which
/// lets the compiler fold it into the probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Max;

macro_rules! impl_max_sentinel {
    ($($t:ty),*) => {
        $(
            impl Sentinel<$t> for Max {
                #[inline(always)]
                fn empty(&self) -> $t {
                    <$t>::MAX
                }

                #[inline(always)]
                fn is_empty(&self, value: &$t) -> bool {
                    *value == <$t>::MAX
                }
            }
        )*
    };
}

impl_max_sentinel!(u8, u16, u32, u64, u128, usize);
