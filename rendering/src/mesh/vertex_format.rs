//! Vertex layout descriptions.
//!
//! A [`VertexFormat`] is an ordered list of [`ElementType`]s. Elements are
//! packed tightly in the order given, so the byte offset of an element is
//! the sum of the sizes of the elements before it.

/// Maximum number of elements a vertex format may hold.
pub const MAX_ELEMENTS: usize = 8;

/// Primitive type backing a vertex element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementDataType {
    Float,
    UnsignedByte,
}

impl ElementDataType {
    /// Size of one component in bytes.
    pub const fn size(self) -> u32 {
        match self {
            Self::Float => 4,
            Self::UnsignedByte => 1,
        }
    }
}

/// A single vertex element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// xyzw position (4 x f32).
    Position4,
    /// Normal (3 x f32).
    Normal3,
    /// Tangent (3 x f32).
    Tangent3,
    /// Bitangent (3 x f32).
    Bitangent3,
    /// Texture coordinate (2 x f32).
    Uv2,
    /// RGBA colour (4 x u8).
    Colour4,
    /// Joint weights (4 x f32).
    Weight4,
    /// Joint indices (4 x u8).
    JointIndex4,
}

impl ElementType {
    /// Number of components in the element.
    pub const fn num_components(self) -> u32 {
        match self {
            Self::Position4 | Self::Colour4 | Self::Weight4 | Self::JointIndex4 => 4,
            Self::Normal3 | Self::Tangent3 | Self::Bitangent3 => 3,
            Self::Uv2 => 2,
        }
    }

    /// Component data type.
    pub const fn data_type(self) -> ElementDataType {
        match self {
            Self::Colour4 | Self::JointIndex4 => ElementDataType::UnsignedByte,
            _ => ElementDataType::Float,
        }
    }

    /// Size of the element in bytes.
    pub const fn size(self) -> u32 {
        self.num_components() * self.data_type().size()
    }
}

/// Ordered, fixed-capacity list of vertex elements.
///
/// Equality is structural and order sensitive: two formats with the same
/// elements in a different order are different formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexFormat {
    // Unused slots are always `Position4` so derived equality and hashing
    // only depend on the used prefix.
    elements: [ElementType; MAX_ELEMENTS],
    num_elements: u32,
    size: u32,
}

impl VertexFormat {
    /// Position, normal, tangent, bitangent and uv.
    pub const STATIC_MESH: Self = Self::new(&[
        ElementType::Position4,
        ElementType::Normal3,
        ElementType::Tangent3,
        ElementType::Bitangent3,
        ElementType::Uv2,
    ]);

    /// [`STATIC_MESH`](Self::STATIC_MESH) plus joint weights and indices.
    pub const ANIMATED_MESH: Self = Self::new(&[
        ElementType::Position4,
        ElementType::Normal3,
        ElementType::Tangent3,
        ElementType::Bitangent3,
        ElementType::Uv2,
        ElementType::Weight4,
        ElementType::JointIndex4,
    ]);

    /// Position, uv and colour.
    pub const SPRITE: Self = Self::new(&[
        ElementType::Position4,
        ElementType::Uv2,
        ElementType::Colour4,
    ]);

    /// Build a format from an ordered element list.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_ELEMENTS`] elements are given.
    pub const fn new(elements: &[ElementType]) -> Self {
        assert!(
            elements.len() <= MAX_ELEMENTS,
            "Vertex format cannot contain more than MAX_ELEMENTS elements"
        );

        let mut stored = [ElementType::Position4; MAX_ELEMENTS];
        let mut size = 0;
        let mut i = 0;
        while i < elements.len() {
            stored[i] = elements[i];
            size += elements[i].size();
            i += 1;
        }

        Self {
            elements: stored,
            num_elements: elements.len() as u32,
            size,
        }
    }

    /// Number of elements in the format.
    pub fn num_elements(&self) -> u32 {
        self.num_elements
    }

    /// Size of one vertex in bytes.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The elements in order.
    pub fn elements(&self) -> &[ElementType] {
        &self.elements[..self.num_elements as usize]
    }

    /// Element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn element(&self, index: usize) -> ElementType {
        assert!(
            index < self.num_elements as usize,
            "Vertex element index {index} out of bounds ({} elements)",
            self.num_elements
        );
        self.elements[index]
    }

    /// Byte offset of the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn element_offset(&self, index: usize) -> u32 {
        assert!(
            index < self.num_elements as usize,
            "Vertex element index {index} out of bounds ({} elements)",
            self.num_elements
        );
        self.elements[..index].iter().map(|e| e.size()).sum()
    }

    /// True if the format contains `element`.
    pub fn contains_element(&self, element: ElementType) -> bool {
        self.elements().contains(&element)
    }

    /// Byte offset of the first occurrence of `element`.
    pub fn element_offset_of(&self, element: ElementType) -> Option<u32> {
        let index = self.elements().iter().position(|e| *e == element)?;
        Some(self.element_offset(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ElementType::Position4, 16)]
    #[case(ElementType::Normal3, 12)]
    #[case(ElementType::Tangent3, 12)]
    #[case(ElementType::Bitangent3, 12)]
    #[case(ElementType::Uv2, 8)]
    #[case(ElementType::Colour4, 4)]
    #[case(ElementType::Weight4, 16)]
    #[case(ElementType::JointIndex4, 4)]
    fn test_element_sizes(#[case] element: ElementType, #[case] size: u32) {
        assert_eq!(element.size(), size);
    }

    #[rstest]
    #[case(VertexFormat::STATIC_MESH, 5, 60)]
    #[case(VertexFormat::ANIMATED_MESH, 7, 80)]
    #[case(VertexFormat::SPRITE, 3, 28)]
    fn test_presets(#[case] format: VertexFormat, #[case] count: u32, #[case] size: u32) {
        assert_eq!(format.num_elements(), count);
        assert_eq!(format.size(), size);
    }

    #[test]
    fn test_equality_is_structural() {
        let a = VertexFormat::new(&[ElementType::Position4, ElementType::Uv2]);
        let b = VertexFormat::new(&[ElementType::Position4, ElementType::Uv2]);
        assert_eq!(a, b);
        assert_eq!(
            VertexFormat::new(&[
                ElementType::Position4,
                ElementType::Uv2,
                ElementType::Colour4
            ]),
            VertexFormat::SPRITE
        );
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = VertexFormat::new(&[ElementType::Position4, ElementType::Uv2]);
        let b = VertexFormat::new(&[ElementType::Uv2, ElementType::Position4]);
        assert_ne!(a, b);
        assert_eq!(a.size(), b.size());
    }

    #[test]
    fn test_prefix_is_not_equal() {
        let a = VertexFormat::new(&[ElementType::Position4]);
        let b = VertexFormat::new(&[ElementType::Position4, ElementType::Position4]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_offsets_sum_preceding_sizes() {
        for format in [
            VertexFormat::STATIC_MESH,
            VertexFormat::ANIMATED_MESH,
            VertexFormat::SPRITE,
        ] {
            assert_eq!(format.element_offset(0), 0);
            let mut expected = 0;
            for i in 0..format.num_elements() as usize {
                assert_eq!(format.element_offset(i), expected);
                expected += format.element(i).size();
            }
            assert_eq!(expected, format.size());
        }
    }

    #[test]
    fn test_element_lookup() {
        let format = VertexFormat::SPRITE;
        assert!(format.contains_element(ElementType::Colour4));
        assert!(!format.contains_element(ElementType::Normal3));
        assert_eq!(format.element_offset_of(ElementType::Colour4), Some(24));
        assert_eq!(format.element_offset_of(ElementType::Weight4), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_element_out_of_range_panics() {
        VertexFormat::SPRITE.element(3);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_element_offset_out_of_range_panics() {
        VertexFormat::SPRITE.element_offset(3);
    }

    #[test]
    #[should_panic(expected = "more than MAX_ELEMENTS")]
    fn test_too_many_elements_panics() {
        let _ = VertexFormat::new(&[ElementType::Uv2; 9]);
    }
}
