//! Scroll window arithmetic shared by the list panes

use ratatui::layout::Rect;

/// Rows available inside a bordered pane, at least 1
pub(crate) fn inner_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `offset` so the window never scrolls past the last item
pub(crate) fn clamp_offset(offset: usize, total: usize, visible: usize) -> usize {
    offset.min(total.saturating_sub(visible))
}

/// Move `offset` the least amount needed to keep `selected` inside the window
pub(crate) fn follow(offset: usize, selected: usize, visible: usize) -> usize {
    if selected < offset {
        selected
    } else if selected >= offset + visible {
        selected + 1 - visible
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_offset() {
        assert_eq!(clamp_offset(usize::MAX, 10, 4), 6);
        assert_eq!(clamp_offset(3, 10, 4), 3);
        assert_eq!(clamp_offset(5, 3, 4), 0);
    }

    #[test]
    fn test_follow_selection() {
        assert_eq!(follow(5, 2, 4), 2);
        assert_eq!(follow(0, 7, 4), 4);
        assert_eq!(follow(2, 3, 4), 2);
        assert_eq!(inner_height(Rect::new(0, 0, 10, 1)), 1);
        assert_eq!(inner_height(Rect::new(0, 0, 10, 12)), 10);
    }
}
