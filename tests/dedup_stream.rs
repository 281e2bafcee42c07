use std::collections::HashSet;
use std::path::{Path, PathBuf};

use korean_corpora::corpora::{kor_corpora, ParseContext, ParserKind};
use korean_corpora::error::Error;
use korean_corpora::processing::{Deduplicator, FailurePolicy, GenerationStats};
use korean_corpora::split::{SplitPredicate, SplitPreset};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const NSMC: ParserKind = ParserKind::KorCorpora(kor_corpora::Format::Nsmc);

/// Writes an NSMC-like file with the given ids.
fn nsmc_file(dir: &Path, name: &str, ids: &[u32]) -> PathBuf {
    let mut content = String::from("id\tdocument\tlabel\n");
    for id in ids {
        content.push_str(&format!("{}\t리뷰 {}\t{}\n", id, id, id % 2));
    }
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn ids_of(
    files: Vec<PathBuf>,
    predicate: Option<SplitPredicate>,
) -> (Vec<String>, GenerationStats) {
    let ctx = ParseContext::default();
    let dedup = Deduplicator::new("nsmc", files, |path: &Path| NSMC.parse(path, &ctx));
    let mut dedup = match predicate {
        Some(p) => dedup.with_predicate(p),
        None => dedup,
    };
    let ids = dedup.by_ref().map(|r| r.unwrap().0).collect();
    (ids, dedup.stats().clone())
}

#[test_log::test]
fn overlapping_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = nsmc_file(dir.path(), "a.txt", &[1, 2, 3, 2]);
    let b = nsmc_file(dir.path(), "b.txt", &[3, 4, 5]);

    let (ids, stats) = ids_of(vec![a, b], None);
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(stats.emitted, 5);
    assert_eq!(stats.duplicates, 2);
    assert_eq!(stats.failed_files, 0);
}

#[test_log::test]
fn unreadable_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let a = nsmc_file(dir.path(), "a.txt", &[1, 2]);
    let bad = dir.path().join("bad.txt");
    let content = "id\tdocument\tlabel\n7\t리뷰\t1\n8\t리뷰\tnot a label\n9\t리뷰\t0\n";
    std::fs::write(&bad, content).unwrap();
    let missing = dir.path().join("missing.txt");
    let b = nsmc_file(dir.path(), "b.txt", &[3]);

    let files = vec![a, bad, missing, b];
    let (ids, stats) = ids_of(files.clone(), None);
    assert_eq!(ids, vec!["1", "2", "7", "3"]);
    assert_eq!(stats.failed_files, 2);

    let ctx = ParseContext::default();
    let strict: Vec<Result<_, Error>> =
        Deduplicator::new("nsmc", files, |path: &Path| NSMC.parse(path, &ctx))
            .with_policy(FailurePolicy::Strict)
            .collect();
    assert_eq!(strict.len(), 4);
    assert!(strict[..3].iter().all(Result::is_ok));
    assert!(strict[3].is_err());
}

#[test]
fn partitions_do_not_depend_on_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut files: Vec<_> = (0..8u32)
        .map(|shard| {
            let ids: Vec<_> = (shard * 50..shard * 50 + 60).collect();
            nsmc_file(dir.path(), &format!("shard_{}.txt", shard), &ids)
        })
        .collect();

    let scheme = SplitPreset::DownstreamTask.scheme();
    let partitions = |files: &[PathBuf]| -> Vec<HashSet<String>> {
        scheme
            .rules
            .iter()
            .map(|rule| {
                let (ids, _) = ids_of(files.to_vec(), Some(rule.predicate));
                ids.into_iter().collect()
            })
            .collect()
    };

    let expected = partitions(&files);
    assert_eq!(expected.iter().map(HashSet::len).sum::<usize>(), 410);
    let union: HashSet<String> = expected.iter().flatten().cloned().collect();
    let all: HashSet<String> = (0..410).map(|i: u32| i.to_string()).collect();
    assert_eq!(union, all);

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..5 {
        files.shuffle(&mut rng);
        assert_eq!(partitions(&files), expected);
    }
}
