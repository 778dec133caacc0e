use crate::domain::{
    board::Board,
    card::{now_millis, Card, Label, LabelColor},
    column::Column,
};
use chrono::Duration;

/// The built-in demo board used whenever no valid snapshot is stored.
///
/// Four columns, seven cards. Creation times are relative to now.
pub fn seed_board() -> Board {
    let now = now_millis();
    let card = |id: &str, title: &str, description: &str, labels: &[LabelColor], days: i64| {
        Card::new(id.into(), title)
            .with_description(description)
            .with_labels(labels.iter().copied().map(Label::from_color).collect())
            .with_created_at(now - Duration::days(days))
    };

    Board::from_parts(
        vec![
            Column::new("backlog".into(), "Backlog").with_cards(["card-1", "card-2"]),
            Column::new("todo".into(), "To Do").with_cards(["card-3", "card-4"]),
            Column::new("in-progress".into(), "In Progress").with_cards(["card-5"]),
            Column::new("done".into(), "Done").with_cards(["card-6", "card-7"]),
        ],
        vec![
            card(
                "card-1",
                "Research competitors",
                "Analyze top 5 Kanban apps and identify key features",
                &[LabelColor::Feature],
                5,
            ),
            card(
                "card-2",
                "Define color palette",
                "Create light and dark mode color schemes",
                &[LabelColor::Design],
                4,
            ),
            card(
                "card-3",
                "Set up project structure",
                "Initialize the workspace, build tooling and CI",
                &[LabelColor::Feature],
                3,
            ),
            card(
                "card-4",
                "Create component library",
                "Build reusable UI components for cards, columns, and modals",
                &[LabelColor::Enhancement],
                2,
            ),
            card(
                "card-5",
                "Build drag & drop",
                "Implement drag and drop for cards and columns",
                &[LabelColor::Feature, LabelColor::Urgent],
                1,
            ),
            card(
                "card-6",
                "Initial planning",
                "Define project scope and create design specification",
                &[LabelColor::Feature],
                7,
            ),
            card(
                "card-7",
                "Design mockups",
                "Create UI mockups for all screens and interactions",
                &[LabelColor::Design],
                6,
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_seed_board_shape() {
        let board = seed_board();

        assert!(board.is_valid());
        assert_eq!(board.column_count(), 4);
        assert_eq!(board.card_count(), 7);
        assert_eq!(board.column_order, ["backlog", "todo", "in-progress", "done"]);
        assert_eq!(board.column("todo").unwrap().title, "To Do");
        assert_eq!(board.column("todo").unwrap().card_ids, ["card-3", "card-4"]);
    }

    #[test]
    fn test_seed_cards_use_palette_labels() {
        let board = seed_board();

        for card in board.cards.values() {
            assert!(card.labels.len() <= 2);
            assert!(card.created_at < Utc::now());
        }
        assert_eq!(board.card("card-5").unwrap().labels.len(), 2);
    }
}
