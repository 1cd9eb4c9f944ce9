//! Character coverage of a face, read once from its cmap.

/// Sorted, non-overlapping inclusive ranges of covered code points.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Coverage {
    ranges: Vec<(u32, u32)>,
}

impl Coverage {
    /// Collects every code point the face's Unicode cmap subtables map to a
    /// real glyph.
    pub(crate) fn from_face(face: &ttf_parser::Face<'_>) -> Self {
        let mut code_points = Vec::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    if subtable.glyph_index(cp).is_some_and(|glyph| glyph.0 != 0) {
                        code_points.push(cp);
                    }
                });
            }
        }
        Self::from_code_points(code_points)
    }

    pub(crate) fn from_code_points(mut code_points: Vec<u32>) -> Self {
        code_points.sort_unstable();
        code_points.dedup();

        let mut ranges: Vec<(u32, u32)> = Vec::new();
        for cp in code_points {
            match ranges.last_mut() {
                Some((_, end)) if *end + 1 == cp => *end = cp,
                _ => ranges.push((cp, cp)),
            }
        }
        Self { ranges }
    }

    pub(crate) fn contains(&self, ch: char) -> bool {
        let cp = ch as u32;
        let after = self.ranges.partition_point(|(start, _)| *start <= cp);
        after > 0 && self.ranges[after - 1].1 >= cp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUFFY: &[u8] = include_bytes!("../../traits/tests/fixtures/Tuffy.ttf");

    #[test]
    fn test_ranges_merge_adjacent_points() {
        let coverage = Coverage::from_code_points(vec![0x43, 0x41, 0x42, 0x42, 0x5A]);
        assert_eq!(coverage.ranges, vec![(0x41, 0x43), (0x5A, 0x5A)]);
        assert!(coverage.contains('A'));
        assert!(coverage.contains('C'));
        assert!(!coverage.contains('D'));
        assert!(coverage.contains('Z'));
        assert!(!coverage.contains('@'));
    }

    #[test]
    fn test_empty_coverage() {
        let coverage = Coverage::from_code_points(Vec::new());
        assert_eq!(coverage, Coverage::default());
        assert!(!coverage.contains('A'));
    }

    #[test]
    fn test_coverage_from_real_face() {
        let face = ttf_parser::Face::parse(TUFFY, 0).unwrap();
        let coverage = Coverage::from_face(&face);
        assert!(coverage.contains('A'));
        assert!(coverage.contains('Ж'));
        assert!(!coverage.contains('字'));
    }
}
