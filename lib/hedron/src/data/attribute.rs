use nalgebra::{Point2, Point3, Vector3};

/// The meaning of a vertex attribute.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeUsage {
    Position,
    Normal,
    Texcoord(u32),
    Color(u32),
}

impl std::fmt::Display for AttributeUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeUsage::Position => f.write_str("position"),
            AttributeUsage::Normal => f.write_str("normal"),
            AttributeUsage::Texcoord(set) => write!(f, "texcoord_{set}"),
            AttributeUsage::Color(set) => write!(f, "color_{set}"),
        }
    }
}

/// The inner components of an [AttributeType]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeComponent {
    U8,
    F32,
}

impl AttributeComponent {
    pub const fn alignment(self) -> usize {
        use std::mem::align_of;
        match self {
            AttributeComponent::U8 => align_of::<u8>(),
            AttributeComponent::F32 => align_of::<f32>(),
        }
    }

    pub const fn size(self) -> usize {
        use std::mem::size_of;
        match self {
            AttributeComponent::U8 => size_of::<u8>(),
            AttributeComponent::F32 => size_of::<f32>(),
        }
    }
}

/// The shape of a single attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Vec2,
    Vec3,
    Vec4,
}

impl AttributeType {
    #[inline]
    pub const fn alignment(self, comp: AttributeComponent) -> usize {
        // arrays have the same alignment as their component type
        comp.alignment()
    }

    pub const fn size_elements(self) -> usize {
        match self {
            AttributeType::Vec2 => 2,
            AttributeType::Vec3 => 3,
            AttributeType::Vec4 => 4,
        }
    }

    pub const fn size_bytes(self, comp: AttributeComponent) -> usize {
        comp.size() * self.size_elements()
    }
}

/// Trait for types which can be used as vertex attribute data.
///
/// # Safety
///
/// Implementing types *must* have the size and alignment described by their `TYPE` and `COMPONENT` constants.
#[allow(unsafe_code)]
pub unsafe trait Attribute: Sized {
    const TYPE: AttributeType;
    const COMPONENT: AttributeComponent;

    /// Size in bytes of one packed value
    const SIZE: usize = Self::TYPE.size_bytes(Self::COMPONENT);
}

mod _impl_attr {
    use super::{Attribute, AttributeComponent, AttributeType};

    macro_rules! impl_attr {
        ($t:ident<$C:ty, $c:ident> => $Target:ty) => {
            const _: () = { // anonymous module
                // "size of type $C == size of component $c"
                static_assertions::const_assert_eq!(std::mem::size_of::<$C>(), AttributeComponent::$c.size());
                // "size of type $Target == size of attribute $t with component $c"
                static_assertions::const_assert_eq!(std::mem::size_of::<$Target>(), AttributeType::$t.size_bytes(AttributeComponent::$c));
                // "alignment of type $Target == alignment of attribute $t with component $c"
                static_assertions::const_assert_eq!(std::mem::align_of::<$Target>(), AttributeType::$t.alignment(AttributeComponent::$c));
                #[allow(unsafe_code)]
                unsafe impl Attribute for $Target {
                    const TYPE: AttributeType = AttributeType::$t;
                    const COMPONENT: AttributeComponent = AttributeComponent::$c;
                }
            };
        };
    }

    impl_attr!(Vec2<f32, F32> => nalgebra::Point2<f32>);
    impl_attr!(Vec3<f32, F32> => nalgebra::Point3<f32>);
    impl_attr!(Vec3<f32, F32> => nalgebra::Vector3<f32>);
    impl_attr!(Vec4<u8, U8> => [u8; 4]);
}

pub type Position = Point3<f32>;
pub type Normal = Vector3<f32>;
pub type Texcoord<C> = Point2<C>;
pub type Rgb<C> = Point3<C>;

/// A vertex as seen by a face corner: where it is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Position,
    pub normal: Normal,
}

impl Vertex {
    #[inline]
    pub fn new(position: Position, normal: Normal) -> Self {
        Self { position, normal }
    }
}
