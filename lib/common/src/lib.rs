use num_traits::{AsPrimitive, NumCast, PrimInt, Unsigned};

/// Trait for types which can act as indices within an array (or an array-like structure); ex.
/// the vertex references stored in each face corner of a mesh.
pub trait ArrayIndex:
    PrimInt + Unsigned + AsPrimitive<usize> + std::fmt::Debug + Send + Sync + 'static
{
    /// Convert a `usize` to this index type, or `None` if it isn't representable.
    #[inline]
    fn narrow(value: usize) -> Option<Self> {
        <Self as NumCast>::from(value)
    }

    /// Widen this index to a `usize`.
    #[inline(always)]
    fn widen(self) -> usize {
        self.as_()
    }
}

impl<P> ArrayIndex for P where
    P: PrimInt + Unsigned + AsPrimitive<usize> + std::fmt::Debug + Send + Sync + 'static
{
}

#[cfg(test)]
mod test {
    use super::ArrayIndex;

    #[test]
    fn narrow_index_overflow() {
        assert_eq!(u8::narrow(255), Some(255u8));
        assert_eq!(u8::narrow(256), None);
        assert_eq!(u16::narrow(70_000), None);
        assert_eq!(u32::narrow(70_000).map(ArrayIndex::widen), Some(70_000));
    }
}
