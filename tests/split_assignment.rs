use korean_corpora::split::{hash_text, hash_value, split_assign, Partition, SplitFn, SplitPreset};

fn ids() -> impl Iterator<Item = String> {
    (0..=2000).map(|i| i.to_string())
}

fn count(preset: SplitPreset, partition: Partition) -> usize {
    let scheme = preset.scheme();
    let rule = scheme
        .rules
        .iter()
        .find(|r| r.partition == partition)
        .unwrap();
    ids()
        .filter(|id| split_assign(id, &rule.predicate))
        .count()
}

#[test]
fn known_values() {
    assert_eq!(hash_value("0"), 0xcfcd208495d565ef66e7dff9f98764da);
    assert_eq!(hash_value("0") % 10, 0);
    assert_eq!(hash_value("0") % 1000, 850);
    assert_eq!(hash_value("1") % 10, 1);
    assert_eq!(hash_value("2") % 10, 2);
    assert_eq!(hash_value("hello") % 1000, 994);
    assert_eq!(hash_value("안녕하세요") % 10, 7);
    assert_eq!(hash_text(""), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(hash_value("") % 10, 6);
}

#[test]
fn assignment_is_deterministic() {
    let validation = |v: u128| v % 10 == 0;
    for id in ids() {
        assert_eq!(split_assign(&id, &validation), split_assign(&id, &validation));
    }
}

#[test]
fn raw_corpus_counts() {
    assert_eq!(count(SplitPreset::RawCorpus, Partition::Validation), 2);
    assert_eq!(count(SplitPreset::RawCorpus, Partition::Train), 1999);

    let scheme = SplitPreset::RawCorpus.scheme();
    let validation: Vec<_> = ids()
        .filter(|id| split_assign(id, &scheme.rules[1].predicate))
        .collect();
    assert_eq!(validation, vec!["265", "1858"]);

    let again: Vec<_> = ids()
        .filter(|id| split_assign(id, &scheme.rules[1].predicate))
        .collect();
    assert_eq!(validation, again);
}

#[test]
fn downstream_task_counts() {
    assert_eq!(count(SplitPreset::DownstreamTask, Partition::Train), 1593);
    assert_eq!(count(SplitPreset::DownstreamTask, Partition::Validation), 202);
    assert_eq!(count(SplitPreset::DownstreamTask, Partition::Test), 206);
}

#[test]
fn holdout_counts() {
    assert_eq!(count(SplitPreset::Holdout, Partition::Train), 1799);
    assert_eq!(count(SplitPreset::Holdout, Partition::Validation), 202);
}

#[test]
fn every_id_lands_in_one_partition() {
    for preset in [SplitPreset::RawCorpus, SplitPreset::DownstreamTask] {
        let scheme = preset.scheme();
        for id in ids() {
            let v = hash_value(&id);
            let hits = scheme
                .rules
                .iter()
                .filter(|r| r.predicate.contains(v))
                .count();
            assert_eq!(hits, 1, "{:?}: {}", preset, id);
        }
    }
}
