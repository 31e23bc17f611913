//! Report rendering
//!
//! Line wording and order are fixed; downstream scripts grep these lines.

use super::aggregate::AggregateState;
use super::storage_names::StorageNames;
use super::units::{format_duration, format_storage};

/// Render the report as lines, in print order.
pub fn render(collection_id: &str, state: &AggregateState, names: &StorageNames) -> Vec<String> {
    let mut lines = vec![
        format!("Storage report for collection ID {}", collection_id),
        format_duration(state.total_duration_ms()),
        format!("Total Assets: {}", state.asset_count),
        format!("Total Collections: {}", state.collection_count),
        format!("Total Video assets: {}", state.video_count),
        format!("Total Audio assets: {}", state.audio_count),
        format!("Total Image assets: {}", state.image_count),
        format!("Total Other assets: {}", state.other_count),
    ];

    for (storage_id, bytes) in state.storage_bytes.iter() {
        lines.push(format!(
            "Total storage used on {} is {}",
            names.display_name(storage_id),
            format_storage(*bytes)
        ));
    }

    lines.push(format!(
        "Total storage used on all storages is {}",
        format_storage(state.total_bytes())
    ));

    for (format_name, count) in state.format_counts.iter() {
        lines.push(format!("Total {} formats: {}", format_name, count));
    }

    lines
}

/// Print the report to stdout.
pub fn print(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_GB: u64 = 1024 * 1024 * 1024;

    #[test]
    fn test_render_empty_state() {
        let lines = render("c1", &AggregateState::default(), &StorageNames::default());
        assert_eq!(
            lines,
            vec![
                "Storage report for collection ID c1",
                "0.00 Days Total, 0.00 Hours, 0.00 Minutes, 0.00 Seconds of total content",
                "Total Assets: 0",
                "Total Collections: 0",
                "Total Video assets: 0",
                "Total Audio assets: 0",
                "Total Image assets: 0",
                "Total Other assets: 0",
                "Total storage used on all storages is 0.00 GB",
            ]
        );
    }

    #[test]
    fn test_render_storage_and_formats() {
        let mut state = AggregateState {
            asset_count: 3,
            video_count: 2,
            other_count: 1,
            total_duration_us: 5_000_000,
            ..Default::default()
        };
        state.storage_bytes.insert("s1".to_string(), ONE_GB);
        state.storage_bytes.insert("s2".to_string(), ONE_GB * 1023);
        state.format_counts.insert("ORIGINAL".to_string(), 3);
        state.format_counts.insert("PROXY".to_string(), 1);

        let mut names = StorageNames::default();
        names.insert("s1", "Primary");

        let lines = render("c1", &state, &names);
        assert!(lines.contains(&"Total storage used on Primary is 1.00 GB".to_string()));
        assert!(lines.contains(&"Total storage used on s2 is 1023.00 GB".to_string()));
        assert!(lines.contains(&"Total storage used on all storages is 1.00 TB".to_string()));
        assert!(lines.contains(&"Total ORIGINAL formats: 3".to_string()));
        assert!(lines.contains(&"Total PROXY formats: 1".to_string()));
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn test_render_section_order() {
        let mut state = AggregateState::default();
        state.storage_bytes.insert("s1".to_string(), 1);
        state.format_counts.insert("mp4".to_string(), 1);

        let lines = render("c1", &state, &StorageNames::default());
        let storage = lines
            .iter()
            .position(|l| l.starts_with("Total storage used on s1"))
            .unwrap();
        let total = lines
            .iter()
            .position(|l| l.starts_with("Total storage used on all storages"))
            .unwrap();
        let format = lines.iter().position(|l| l == "Total mp4 formats: 1").unwrap();

        assert!(lines[7].starts_with("Total Other assets"));
        assert!(storage > 7 && storage < total && total < format);
    }
}
