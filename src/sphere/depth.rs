//! Painter's-algorithm ordering for one frame

use super::segment::Segment;

/// Indices of the visible segments, back to front.
///
/// The canonical segment list is never reordered; this returns a fresh
/// permutation for the current frame. Equal depths keep index order.
pub fn draw_order(segments: &[Segment]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..segments.len())
        .filter(|&i| segments[i].is_visible())
        .collect();
    order.sort_by(|&a, &b| segments[a].depth().total_cmp(&segments[b].depth()));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::PixelBuffer;
    use crate::sphere::segment::slice_columns;

    #[test]
    fn test_four_segment_draw_order() {
        let mut segments = slice_columns(&PixelBuffer::with_size(4, 2));
        for seg in &mut segments {
            seg.project(90.0, 1, (0, 0));
        }
        // Segments 0 and 2 tie at depth 2 and keep index order; 3 is frontmost
        assert_eq!(draw_order(&segments), vec![0, 2, 3]);
    }

    #[test]
    fn test_order_is_ascending_depth() {
        let mut segments = slice_columns(&PixelBuffer::with_size(37, 1));
        for seg in &mut segments {
            seg.project(134.0, 2, (0, 0));
        }
        let order = draw_order(&segments);
        assert!(!order.is_empty());
        for pair in order.windows(2) {
            assert!(segments[pair[0]].depth() <= segments[pair[1]].depth());
        }
        assert!(order.iter().all(|&i| segments[i].is_visible()));
    }

    #[test]
    fn test_empty_segments() {
        assert!(draw_order(&[]).is_empty());
    }
}
