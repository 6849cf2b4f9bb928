//! Named catalogs of spinners, bars and themes.
//!
//! Names are stable and listed in display order. Lookups build a fresh
//! factory every time; factories are cheap until compiled.

use crate::animations::{
    AlongsideSpinner, BarFactory, BouncingSpinner, DelayedSpinner, FrameSpinner,
    ScrollingSpinner, SpinnerFactory,
};

/// Spinner names, in display order.
pub const SPINNER_NAMES: &[&str] = &[
    "classic",
    "stars",
    "twirl",
    "twirls",
    "arrow",
    "arrows",
    "vertical",
    "waves",
    "waves2",
    "waves3",
    "horizontal",
    "dots",
    "dots_reverse",
    "dots_waves",
    "dots_waves2",
    "ball_scrolling",
    "balls_scrolling",
    "ball_bouncing",
    "balls_bouncing",
    "dots_recur",
    "bar_recur",
    "pointer",
    "arrows_recur",
    "triangles",
    "triangles2",
    "brackets",
    "balls_filling",
    "notes",
    "notes2",
    "notes_scrolling",
    "arrows_incoming",
    "arrows_outgoing",
    "real_arrow",
    "fish",
    "fish2",
    "fish_bouncing",
    "fishes",
    "message_scrolling",
    "message_bouncing",
    "long_message",
    "pulse",
];

/// Bar names, in display order.
pub const BAR_NAMES: &[&str] = &[
    "classic",
    "classic2",
    "smooth",
    "blocks",
    "bubbles",
    "circles",
    "hollow",
    "squares",
    "solid",
    "checks",
    "filling",
    "brackets",
    "notes",
    "halloween",
    "fish",
];

/// A named combination of spinner, bar and unknown bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Theme name.
    pub name: &'static str,
    /// Spinner name.
    pub spinner: &'static str,
    /// Bar name.
    pub bar: &'static str,
    /// Spinner name used by bars with an unknown total.
    pub unknown: &'static str,
}

/// Every theme, in display order.
pub const THEMES: &[Theme] = &[
    Theme {
        name: "smooth",
        spinner: "waves",
        bar: "smooth",
        unknown: "triangles",
    },
    Theme {
        name: "classic",
        spinner: "classic",
        bar: "classic",
        unknown: "brackets",
    },
    Theme {
        name: "ascii",
        spinner: "classic",
        bar: "classic2",
        unknown: "stars",
    },
];

const PULSE: &[&str] = &[
    "•–––––––––––––",
    "–•––––––––––––",
    "––•–––––––––––",
    "–––•––––––––––",
    "––––•–––––––––",
    "–––––√––––––––",
    "–––––√\\–––––––",
    "–––––√\\/––––––",
    "–––––√\\/•–––––",
    "–––––√\\/–•––––",
    "––––––\\/––•–––",
    "–––––––/–––•––",
    "––––––––––––•–",
    "–––––––––––––•",
];

fn frames(text: &str) -> SpinnerFactory {
    SpinnerFactory::new(FrameSpinner::from_text(text))
}

fn delayed(factory: SpinnerFactory, copies: usize, offset: usize) -> SpinnerFactory {
    SpinnerFactory::new(DelayedSpinner::new(factory, copies, offset))
}

fn scrolling(chars: &str, length: usize, block: usize) -> ScrollingSpinner {
    ScrollingSpinner::new(chars).length(length).block(block)
}

fn bouncing(chars: &str, length: usize, block: usize) -> BouncingSpinner {
    BouncingSpinner::new(chars).length(length).block(block)
}

/// Look up a spinner by name.
pub fn spinner(name: &str) -> Option<SpinnerFactory> {
    let factory = match name {
        "classic" => frames(r"-\|/"),
        "stars" => SpinnerFactory::new(scrolling("*", 4, 1).hide(false)),
        "twirl" => frames("◐◓◑◒"),
        "twirls" => delayed(frames("◐◓◑◒"), 3, 1),
        "arrow" => frames("←↖↑↗→↘↓↙"),
        "arrows" => delayed(frames("←↖↑↗→↘↓↙"), 3, 1),
        "vertical" => frames("▁▂▃▄▅▆▇█▇▆▅▄▃▂"),
        "waves" => delayed(frames("▁▂▃▄▅▆▇█▇▆▅▄▃▂"), 3, 2),
        "waves2" => delayed(frames("▁▂▃▄▅▆▇█▇▆▅▄▃▂"), 3, 5),
        "waves3" => delayed(frames("▁▂▃▄▅▆▇█▇▆▅▄▃▂"), 3, 7),
        "horizontal" => frames("▏▎▍▌▋▊▉█▉▊▋▌▍▎▏"),
        "dots" => frames("⠁⠈⠐⠠⢀⡀⠄⠂"),
        "dots_reverse" => frames("⣾⣷⣯⣟⡿⢿⣻⣽"),
        "dots_waves" => delayed(frames("⠁⠈⠐⠠⢀⡀⠄⠂"), 5, 1),
        "dots_waves2" => delayed(frames("⠁⠈⠐⠠⢀⡀⠄⠂"), 5, 2),
        "ball_scrolling" => SpinnerFactory::new(scrolling("●", 3, 0).background("∙")),
        "balls_scrolling" => SpinnerFactory::new(scrolling("●", 3, 1).background("∙")),
        "ball_bouncing" => SpinnerFactory::new(bouncing("●", 8, 0).hide(false)),
        "balls_bouncing" => SpinnerFactory::new(bouncing("●", 8, 1).hide(false)),
        "dots_recur" => SpinnerFactory::new(bouncing(".", 3, 3)),
        "bar_recur" => SpinnerFactory::new(bouncing("=", 4, 3)),
        "pointer" => SpinnerFactory::new(scrolling("►", 5, 2).hide(false)),
        "arrows_recur" => SpinnerFactory::new(bouncing("→", 6, 3).opposite("←")),
        "triangles" => SpinnerFactory::new(bouncing("▶", 6, 2).opposite("◀").hide(false)),
        "triangles2" => delayed(
            SpinnerFactory::new(bouncing("▶▷", 6, 3).opposite("◁◀")),
            2,
            9,
        ),
        "brackets" => SpinnerFactory::new(bouncing(">", 8, 3).opposite("<").hide(false)),
        "balls_filling" => {
            SpinnerFactory::new(bouncing("∙●", 10, 5).opposite("○").hide(false))
        }
        "notes" => SpinnerFactory::new(bouncing("♩♪", 10, 4).opposite("♫♬")),
        "notes2" => SpinnerFactory::new(bouncing("♩♪", 10, 4).opposite("♫♬").hide(false)),
        "notes_scrolling" => SpinnerFactory::new(scrolling("♩♪♫♬", 10, 4).hide(false)),
        "arrows_incoming" => SpinnerFactory::new(AlongsideSpinner::new(vec![
            SpinnerFactory::new(scrolling(">.", 6, 4).right(true)),
            SpinnerFactory::new(scrolling("<.", 6, 4).right(false)),
        ])),
        "arrows_outgoing" => SpinnerFactory::new(AlongsideSpinner::new(vec![
            SpinnerFactory::new(scrolling("<.", 6, 4).right(false)),
            SpinnerFactory::new(scrolling(">.", 6, 4).right(true)),
        ])),
        "real_arrow" => SpinnerFactory::new(ScrollingSpinner::new(">>------>").length(18)),
        "fish" => SpinnerFactory::new(ScrollingSpinner::new("><(((('>").length(15).hide(false)),
        "fish2" => SpinnerFactory::new(
            ScrollingSpinner::new("¸.·´¯`·.·´¯`·.¸¸.·´¯`·.¸><(((º>").length(16),
        ),
        "fish_bouncing" => SpinnerFactory::new(
            BouncingSpinner::new("><(((('>")
                .opposite("<'))))><")
                .length(18)
                .hide(false),
        ),
        "fishes" => SpinnerFactory::new(
            BouncingSpinner::new("><>     ><>")
                .opposite("<><  <><    <><")
                .length(18),
        ),
        "message_scrolling" => {
            SpinnerFactory::new(ScrollingSpinner::new("please wait...").right(false))
        }
        "message_bouncing" => SpinnerFactory::new(
            BouncingSpinner::new("please")
                .opposite("wait")
                .length(15)
                .hide(false),
        ),
        "long_message" => SpinnerFactory::new(
            BouncingSpinner::new("processing")
                .opposite("well, this is taking longer than anticipated, hold on")
                .length(15),
        ),
        "pulse" => SpinnerFactory::new(FrameSpinner::from_frames(PULSE)),
        _ => return None,
    };
    Some(factory)
}

/// Look up a bar by name.
pub fn bar(name: &str) -> Option<BarFactory> {
    let factory = match name {
        "classic" => BarFactory::new("=").borders("[", "]"),
        "classic2" => BarFactory::new("#").background(".").borders("[", "]").tip(""),
        "smooth" => BarFactory::new("▏▎▍▌▋▊▉█").tip("").errors("⚠", "✗"),
        "blocks" => BarFactory::new("▏▎▍▌▋▊▉").tip("").errors("⚠", "✗"),
        "bubbles" => BarFactory::new("∙○⦿●").borders("<", ">").tip("").errors("⚠", "✗"),
        "circles" => BarFactory::new("●")
            .background("○")
            .borders("<", ">")
            .tip("")
            .errors("⚠", "✗"),
        "hollow" => BarFactory::new("❒").borders("<", ">").tip("▷").errors("⚠", "✗"),
        "squares" => BarFactory::new("■")
            .background("❒")
            .borders("<", ">")
            .tip("")
            .errors("⚠", "✗"),
        "solid" => BarFactory::new("■").borders("<", ">").tip("►").errors("⚠", "✗"),
        "checks" => BarFactory::new("✓").tip("").errors("⚠", "✗"),
        "filling" => BarFactory::new("▁▂▃▄▅▆▇█").tip("").errors("⚠", "✗"),
        "brackets" => BarFactory::new(">").tip(""),
        "notes" => BarFactory::new("♩♪♫♬").tip("").errors("♭", "♯"),
        "halloween" => BarFactory::new("🎃")
            .background(" 👻 💀")
            .tip("")
            .errors("😱", "🗡"),
        "fish" => BarFactory::new("").tip("><('>").background("°·.,"),
        _ => return None,
    };
    Some(factory)
}

/// Look up a theme by name.
pub fn theme(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name == name)
}

/// Theme names, in display order.
pub fn theme_names() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|t| t.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_spinner_name_resolves() {
        for name in SPINNER_NAMES {
            assert!(spinner(name).is_some(), "missing spinner {name}");
        }
        assert!(spinner("nope").is_none());
    }

    #[test]
    fn test_every_spinner_compiles_at_natural_length() {
        for name in SPINNER_NAMES {
            let factory = spinner(name).unwrap();
            let runner = factory
                .compile(None)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(runner.length(), factory.natural(), "{name}");
        }
    }

    #[test]
    fn test_every_spinner_compiles_at_other_lengths() {
        for name in SPINNER_NAMES {
            let factory = spinner(name).unwrap();
            for length in [1, 4, 9, 20] {
                let runner = factory
                    .compile(Some(length))
                    .unwrap_or_else(|e| panic!("{name} at {length}: {e}"));
                assert_eq!(runner.length(), length, "{name}");
            }
        }
    }

    #[test]
    fn test_every_bar_renders_at_constant_length() {
        for name in BAR_NAMES {
            let factory = bar(name).unwrap_or_else(|| panic!("missing bar {name}"));
            let compiled = factory.compile(20).unwrap_or_else(|e| panic!("{name}: {e}"));
            let expected = compiled.render(1.0, false).len();
            for i in 0..=20 {
                let percent = i as f64 / 20.0;
                assert_eq!(compiled.render(percent, false).len(), expected, "{name} {percent}");
                assert_eq!(compiled.render(percent, true).len(), expected, "{name} {percent}");
            }
        }
    }

    #[test]
    fn test_themes_reference_existing_styles() {
        for theme in THEMES {
            assert!(spinner(theme.spinner).is_some(), "{}", theme.name);
            assert!(bar(theme.bar).is_some(), "{}", theme.name);
            assert!(spinner(theme.unknown).is_some(), "{}", theme.name);
        }
        assert_eq!(theme("smooth").map(|t| t.bar), Some("smooth"));
        assert_eq!(theme_names().collect::<Vec<_>>(), vec!["smooth", "classic", "ascii"]);
    }

    #[test]
    fn test_classic_bar() {
        let rendered = bar("classic").unwrap().compile(10).unwrap().render(0.5, false);
        assert_eq!(rendered.to_string(), "[=====>    ]");
    }
}
