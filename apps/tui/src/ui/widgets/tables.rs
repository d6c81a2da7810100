/// First row to draw so `selected_index` stays visible in a list of
/// `total_rows` with room for `max_visible_rows`.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_never_scroll() {
        assert_eq!(scroll_offset(4, 10, 3), 0);
    }

    #[test]
    fn selection_past_the_fold_scrolls_it_into_view() {
        assert_eq!(scroll_offset(18, 8, 7), 0);
        assert_eq!(scroll_offset(18, 8, 8), 1);
        assert_eq!(scroll_offset(18, 8, 17), 10);
    }
}
