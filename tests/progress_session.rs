//! Progress session tests through the public API.
//!
//! Sessions run on a [`MemoryTerminal`] so the exact output can be checked.

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use alive_progress::{config_handler, AliveBar, Config, MemoryTerminal, ProgressError};

fn quiet(config: Config) -> Config {
    Config {
        elapsed: false,
        stats: false,
        ..config
    }
}

fn start(total: Option<u64>, config: &Config) -> (AliveBar, MemoryTerminal) {
    let term = MemoryTerminal::non_interactive();
    let bar = AliveBar::with_terminal(total, config, Arc::new(term.clone())).unwrap();
    (bar, term)
}

#[test]
fn test_complete_run_has_no_warning() {
    let (bar, term) = start(Some(1000), &Config::default());
    for _ in 0..1000 {
        bar.inc(1).unwrap();
    }
    bar.finish();

    let out = term.contents();
    assert!(out.contains("1000/1000 [100%]"), "{out}");
    assert!(!out.contains("(!)"), "{out}");
    assert!(out.contains(" in "), "{out}");
}

#[test]
fn test_interrupted_run_is_flagged() {
    let (bar, term) = start(Some(1000), &Config::default());
    bar.inc(700).unwrap();
    drop(bar);

    assert!(term.contents().contains("(!) 700/1000 [70%]"));
}

#[test]
fn test_overflow_is_flagged() {
    let config = quiet(Config {
        bar: None,
        ..Config::default()
    });
    let (bar, term) = start(Some(10), &config);
    bar.inc(12).unwrap();
    bar.finish();

    assert_eq!(term.contents(), "(!) 12/10 [120%]\n");
}

#[test]
fn test_panicking_work_still_restores_the_terminal() {
    let config = quiet(Config {
        bar: None,
        ..Config::default()
    });
    let term = MemoryTerminal::interactive(80);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let bar = AliveBar::with_terminal(Some(10), &config, Arc::new(term.clone())).unwrap();
        bar.inc(3).unwrap();
        panic!("work failed");
    }));
    assert!(outcome.is_err());

    let raw = term.contents();
    let hidden = raw.rfind("\x1b[?25l").unwrap();
    let shown = raw.rfind("\x1b[?25h").unwrap();
    assert!(shown > hidden, "{raw:?}");
    let screen = term.screen();
    assert!(screen.contains("(!) 3/10 [30%]"), "{screen:?}");
}

#[test]
fn test_with_alive_bar_returns_the_work_result() {
    let config = Config {
        disable: true,
        ..Config::default()
    };
    let result = alive_progress::with_alive_bar(Some(3), &config, |bar| {
        for _ in 0..3 {
            bar.inc(1)?;
        }
        Ok::<_, ProgressError>(bar.count() * 2)
    })
    .unwrap()
    .unwrap();

    assert_eq!(result, 6);
}

#[test]
fn test_increments_from_several_threads() {
    let config = quiet(Config {
        bar: None,
        spinner: None,
        ..Config::default()
    });
    let (bar, term) = start(Some(400), &config);

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..100 {
                    bar.inc(1).unwrap();
                }
            });
        }
    });
    assert_eq!(bar.count(), 400);
    bar.finish();

    assert_eq!(term.contents(), "400/400 [100%]\n");
}

#[test]
fn test_writer_output_is_enriched_and_indented() {
    let config = quiet(Config {
        bar: None,
        ..Config::default()
    });
    let (bar, term) = start(Some(2), &config);
    bar.inc(1).unwrap();

    let mut writer = bar.writer();
    write!(writer, "first").unwrap();
    writeln!(writer, " line\nsecond line").unwrap();
    bar.inc(1).unwrap();
    bar.finish();

    assert_eq!(
        term.contents(),
        "on 1: first line\n      second line\n2/2 [100%]\n"
    );
}

#[test]
fn test_prints_without_enrichment() {
    let config = quiet(Config {
        bar: None,
        enrich_print: false,
        ..Config::default()
    });
    let (bar, term) = start(Some(1), &config);
    bar.println("plain");
    bar.inc(1).unwrap();
    bar.finish();

    assert_eq!(term.contents(), "plain\n1/1 [100%]\n");
}

#[test]
fn test_contexts_from_the_global_handler() {
    let config = config_handler()
        .create_context(&[
            ("style.bar", "classic"),
            ("style.length", "10"),
            ("widgets.elapsed", "false"),
            ("widgets.stats", "false"),
        ])
        .unwrap();
    let (bar, term) = start(Some(2), &config);
    bar.inc(2).unwrap();
    bar.finish();

    assert_eq!(term.contents(), "[==========] 2/2 [100%]\n");
}
