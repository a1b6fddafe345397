//! End-to-end verification over generated checkpoint corpora

use ckpt_verify::models::constants::names;
use ckpt_verify::verify::PagePairing;
use ckpt_verify::{JobId, Verifier};

use super::fixtures;
use super::helpers::{copy_checkpoint, set_age, CheckpointParams, Corpus};

fn job(id: &str) -> JobId {
    JobId::new(id).unwrap()
}

#[test]
fn test_equivalent_independent_checkpoints_pass() {
    let corpus = Corpus::new().unwrap();
    let base = CheckpointParams::independent_run(4242, 0, 0x5555_5555_0000);
    let saved = CheckpointParams {
        page_misses: 5,
        ..CheckpointParams::independent_run(4242, 37, 0x7fff_1000_0000)
    };
    corpus.checkpoint("job-base-1700000001", &base, 60).unwrap();
    corpus.checkpoint("job-saved-1700000002", &saved, 30).unwrap();

    let verifier = Verifier::new(corpus.config());
    let verification = verifier
        .run(&job("job-base"), &job("job-saved"), false)
        .expect("verification should complete");

    let report = &verification.report;
    for name in [names::FILES, names::MM, names::PAGEMAP, names::OTHER] {
        let result = report.get(name).unwrap();
        assert!(result.passed, "{name} should pass: {result:?}");
    }
    assert!(report.passed());
    assert_eq!(report.overall().name, "overall");
    assert_eq!(report.results().len(), 4);
    assert!(verification.first.path.ends_with("job-base-1700000001"));
}

#[test]
fn test_exact_copy_passes() {
    let corpus = Corpus::new().unwrap();
    let original = corpus
        .checkpoint("job-a-1", &CheckpointParams::default(), 60)
        .unwrap();
    let copy = corpus.root().join("job-b-1");
    copy_checkpoint(&original, &copy).unwrap();
    set_age(&copy, 10).unwrap();

    let verifier = Verifier::new(corpus.config());
    assert!(verifier.verify(&job("job-a"), &job("job-b"), false).unwrap());

    let report = verifier
        .compare_directories(&original, &original, true)
        .unwrap();
    assert!(report.rows().all(|r| r.passed));
}

#[test]
fn test_newest_checkpoint_is_selected() {
    let corpus = Corpus::new().unwrap();
    let diverged = CheckpointParams {
        seccomp_mode: 2,
        ..Default::default()
    };
    corpus.checkpoint("job-a-old", &diverged, 600).unwrap();
    corpus
        .checkpoint("job-a-new", &CheckpointParams::default(), 10)
        .unwrap();
    corpus
        .checkpoint("job-b-1", &CheckpointParams::default(), 10)
        .unwrap();

    let verifier = Verifier::new(corpus.config());
    let verification = verifier.run(&job("job-a"), &job("job-b"), false).unwrap();
    assert!(verification.first.path.ends_with("job-a-new"));
    assert!(verification.passed());
}

#[test]
fn test_each_comparator_reports_its_own_divergence() {
    let corpus = Corpus::new().unwrap();
    corpus
        .checkpoint("job-a-1", &CheckpointParams::default(), 60)
        .unwrap();
    let diverged = CheckpointParams {
        files: Some(fixtures::files_json_with_moved_cursor(11)),
        mm: Some(fixtures::mm_json_with_extra_vma(0x6000_0000_0000)),
        page_misses: 150,
        seccomp_mode: 1,
        ..CheckpointParams::independent_run(999, 11, 0x6000_0000_0000)
    };
    corpus.checkpoint("job-b-1", &diverged, 30).unwrap();

    let verifier = Verifier::new(corpus.config());
    let report = verifier
        .run(&job("job-a"), &job("job-b"), false)
        .unwrap()
        .report;

    let reason = |name: &str| report.get(name).unwrap().reason.clone().unwrap();
    assert_eq!(reason(names::FILES), "differing entries");
    assert_eq!(reason(names::MM), "differing vmas");
    assert_eq!(
        reason(names::PAGEMAP),
        "misses / len(entries) = 0.75 should be < 0.25"
    );
    assert_eq!(reason(names::OTHER), "other files differ");
    assert!(!report.passed());
    assert_eq!(report.overall().reason.as_deref(), Some(">0 diff failed"));
}

#[test]
fn test_scalar_mm_difference() {
    let corpus = Corpus::new().unwrap();
    corpus
        .checkpoint("job-a-1", &CheckpointParams::default(), 60)
        .unwrap();
    let diverged = CheckpointParams {
        mm: Some(fixtures::mm_json(0x6000_0000_0000, 0)),
        ..Default::default()
    };
    corpus.checkpoint("job-b-1", &diverged, 30).unwrap();

    let report = Verifier::new(corpus.config())
        .run(&job("job-a"), &job("job-b"), false)
        .unwrap()
        .report;
    let mm = report.get(names::MM).unwrap();
    assert_eq!(mm.reason.as_deref(), Some("differing fields"));
    assert!(report.get(names::FILES).unwrap().passed);
}

#[test]
fn test_pagemap_index_difference_fails_regardless_of_pages() {
    let corpus = Corpus::new().unwrap();
    corpus
        .checkpoint("job-a-1", &CheckpointParams::default(), 60)
        .unwrap();
    let diverged = CheckpointParams {
        pages_id: 2,
        ..Default::default()
    };
    corpus.checkpoint("job-b-1", &diverged, 30).unwrap();

    let report = Verifier::new(corpus.config())
        .run(&job("job-a"), &job("job-b"), false)
        .unwrap()
        .report;
    assert_eq!(
        report.get(names::PAGEMAP).unwrap().reason.as_deref(),
        Some("differing indices")
    );
}

#[test]
fn test_page_threshold_boundary() {
    let corpus = Corpus::new().unwrap();
    let first = CheckpointParams {
        pages: 100,
        ..Default::default()
    };
    corpus.checkpoint("job-a-1", &first, 60).unwrap();
    corpus
        .checkpoint(
            "job-b-1",
            &CheckpointParams {
                page_misses: 24,
                ..first.clone()
            },
            30,
        )
        .unwrap();
    corpus
        .checkpoint(
            "job-c-1",
            &CheckpointParams {
                page_misses: 25,
                ..first.clone()
            },
            30,
        )
        .unwrap();

    for pairing in [PagePairing::Positional, PagePairing::Multiset] {
        let mut config = corpus.config();
        config.pagemap_pairing = pairing;
        let verifier = Verifier::new(config);

        let below = verifier.run(&job("job-a"), &job("job-b"), false).unwrap();
        assert!(below.report.get(names::PAGEMAP).unwrap().passed, "{pairing}");

        let at = verifier.run(&job("job-a"), &job("job-c"), false).unwrap();
        assert!(!at.report.get(names::PAGEMAP).unwrap().passed, "{pairing}");
    }
}

#[test]
fn test_custom_threshold() {
    let corpus = Corpus::new().unwrap();
    corpus
        .checkpoint("job-a-1", &CheckpointParams::default(), 60)
        .unwrap();
    let diverged = CheckpointParams {
        page_misses: 60,
        ..Default::default()
    };
    corpus.checkpoint("job-b-1", &diverged, 30).unwrap();

    let mut config = corpus.config();
    assert!(!Verifier::new(config.clone())
        .verify(&job("job-a"), &job("job-b"), false)
        .unwrap());

    config.page_miss_threshold = 0.5;
    assert!(Verifier::new(config)
        .verify(&job("job-a"), &job("job-b"), false)
        .unwrap());
}

#[test]
fn test_parallel_matches_sequential() {
    let corpus = Corpus::new().unwrap();
    corpus
        .checkpoint("job-a-1", &CheckpointParams::default(), 60)
        .unwrap();
    let diverged = CheckpointParams {
        mm: Some(fixtures::mm_json_with_extra_vma(0x5555_5555_0000)),
        page_misses: 10,
        ..Default::default()
    };
    corpus.checkpoint("job-b-1", &diverged, 30).unwrap();

    let sequential = Verifier::new(corpus.config())
        .run(&job("job-a"), &job("job-b"), true)
        .unwrap();

    let mut config = corpus.config();
    config.parallel = true;
    let parallel = Verifier::new(config)
        .run(&job("job-a"), &job("job-b"), true)
        .unwrap();

    assert_eq!(sequential.report, parallel.report);
    assert!(!parallel.passed());
}

#[test]
fn test_verbose_names_differing_other_file() {
    let corpus = Corpus::new().unwrap();
    corpus
        .checkpoint("job-a-1", &CheckpointParams::default(), 60)
        .unwrap();
    let diverged = CheckpointParams {
        seccomp_mode: 2,
        ..Default::default()
    };
    corpus.checkpoint("job-b-1", &diverged, 30).unwrap();

    let report = Verifier::new(corpus.config())
        .run(&job("job-a"), &job("job-b"), true)
        .unwrap()
        .report;
    let reason = report.get(names::OTHER).unwrap().reason.clone().unwrap();
    assert!(reason.contains("job-a-1/seccomp.json"), "{reason}");
    assert!(reason.contains("job-b-1/seccomp.json"), "{reason}");
}

#[test]
fn test_failing_diagnostic_does_not_change_verdict() {
    let corpus = Corpus::new().unwrap();
    corpus
        .checkpoint("job-a-1", &CheckpointParams::default(), 60)
        .unwrap();
    corpus
        .checkpoint("job-b-1", &CheckpointParams::default(), 30)
        .unwrap();

    let mut config = corpus.config();
    config.diagnostic.enabled = true;
    config.diagnostic.program = "ckpt-verify-missing-show-command".to_string();
    assert!(Verifier::new(config)
        .verify(&job("job-a"), &job("job-b"), true)
        .unwrap());
}
