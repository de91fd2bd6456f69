pub mod mock_remote;

use tasktagger::core::vocabulary::VOCABULARY;
use tasktagger::ClassificationRecord;

/// Assert the record invariants every classification path must uphold
pub fn assert_valid_record(record: &ClassificationRecord) {
    assert!(
        (1..=2).contains(&record.tags.len()),
        "bad tag count: {:?}",
        record.tags
    );
    for tag in &record.tags {
        assert!(VOCABULARY.contains(tag), "tag outside vocabulary: {tag}");
    }
    assert!((1..=5).contains(&record.priority.value()));
    assert!(record.summary.chars().count() <= 50);
    assert!(!record.original.trim().is_empty());
}
