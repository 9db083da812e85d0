use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Arena slot index, shifted by one so zero stays free as a niche.
///
/// `Option<Handle>` is therefore the same size as `Handle`, which keeps the
/// three links stored per tree node pointer-free and compact.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // The bound check above rules out truncation; the shift by one
        // rules out zero.
        #[allow(clippy::cast_possible_truncation)]
        let shifted = (index + 1) as RawHandle;
        match NonZero::new(shifted) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        self.0.get() as usize - 1
    }
}
