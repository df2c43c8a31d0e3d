//! Sink rendering and persistence.

use std::fs;
use std::path::PathBuf;

use tally::sink::{fail, note, okay, DEFAULT_ARTIFACT};
use tally::{Sink, Style};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tally-sink-{}-{}", std::process::id(), name))
}

fn sample() -> Sink {
    let mut sink = Sink::new();
    sink.plain("[~] SEQUENTIAL ORDER TEST RUN");
    sink.success("PASS\tfirst");
    sink.error("FAIL\tsecond <b>");
    sink.warning("careful");
    sink.plain("1 OF 2 (50.00%) TESTS PASSED");
    sink
}

#[cfg(test)]
mod text_tests {
    use super::*;

    #[test]
    fn test_text_is_raw_and_newline_terminated() {
        let text = sample().render_text();
        assert!(!text.contains('\x1b'));
        assert!(text.ends_with("TESTS PASSED\n"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_save_text_round_trip() {
        let sink = sample();
        let path = scratch_path("round-trip.txt");
        sink.save_text(&path).unwrap();
        let read_back = fs::read(&path).unwrap();
        assert_eq!(read_back, sink.render_text().into_bytes());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_overwrites() {
        let path = scratch_path("overwrite.txt");
        fs::write(&path, "old old old old old old old old\n").unwrap();
        let mut sink = Sink::new();
        sink.plain("new");
        sink.save_text(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_default_artifact_path() {
        assert_eq!(Sink::new().artifact_path(), std::path::Path::new(DEFAULT_ARTIFACT));
        assert_eq!(DEFAULT_ARTIFACT, "test_results.txt");
    }
}

#[cfg(test)]
mod style_tests {
    use super::*;

    #[test]
    fn test_named_styles_and_fallback() {
        let mut sink = Sink::new();
        sink.write_named("a", "green");
        sink.write_named("b", "orange");
        sink.write_named("c", "red");
        sink.write_named("d", "chartreuse");
        let styles: Vec<Style> = sink.lines().iter().map(|l| l.style()).collect();
        assert_eq!(
            styles,
            vec![Style::Success, Style::Warning, Style::Error, Style::Plain]
        );
    }

    #[test]
    fn test_lines_keep_write_order() {
        let sink = sample();
        let texts: Vec<&str> = sink.lines().iter().map(|l| l.text()).collect();
        assert_eq!(texts[0], "[~] SEQUENTIAL ORDER TEST RUN");
        assert_eq!(texts[4], "1 OF 2 (50.00%) TESTS PASSED");
    }
}

#[cfg(test)]
mod html_tests {
    use super::*;

    #[test]
    fn test_html_document_shape() {
        let html = sample().render_html();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang='en'>"));
        assert!(html.contains("<title>Test Results</title>"));
        assert!(html.contains("<h1>Test Results</h1>"));
        assert_eq!(html.matches("<p").count(), 5);
    }

    #[test]
    fn test_html_colors() {
        let html = sample().render_html();
        assert!(html.contains("<p>[~] SEQUENTIAL ORDER TEST RUN</p>"));
        assert!(html.contains("<p style='color: green;'>PASS\tfirst</p>"));
        assert!(html.contains("<p style='color: red;'>FAIL\tsecond &lt;b&gt;</p>"));
        assert!(html.contains("<p style='color: orange;'>careful</p>"));
        assert!(html.contains("<p>1 OF 2 (50.00%) TESTS PASSED</p>"));
    }

    #[test]
    fn test_save_html() {
        let sink = sample();
        let path = scratch_path("report.html");
        sink.save_html(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), sink.render_html());
        let _ = fs::remove_file(&path);
    }
}

#[cfg(test)]
mod terminal_tests {
    use super::*;

    #[test]
    fn test_plain_lines_have_no_escapes() {
        let rendered = sample().render_terminal();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "[~] SEQUENTIAL ORDER TEST RUN");
        assert_eq!(lines[4], "1 OF 2 (50.00%) TESTS PASSED");
    }

    #[test]
    fn test_colored_lines_reset_at_end() {
        let rendered = sample().render_terminal();
        for line in rendered.lines().skip(1).take(3) {
            assert!(line.contains("\x1b["), "missing color in {line:?}");
            assert!(line.ends_with("\x1b[0m"), "missing reset in {line:?}");
        }
    }

    #[test]
    fn test_colors_differ_per_style() {
        let mut green = Sink::new();
        green.success("x");
        let mut red = Sink::new();
        red.error("x");
        let mut yellow = Sink::new();
        yellow.warning("x");
        let g = green.render_terminal();
        let r = red.render_terminal();
        let y = yellow.render_terminal();
        assert_ne!(g, r);
        assert_ne!(g, y);
        assert_ne!(r, y);
    }

    #[test]
    fn test_colored_terminal_write_matches_rendering() {
        let sink = sample();
        let mut out = Vec::new();
        sink.write_terminal(&mut out, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), sink.render_terminal());
    }

    #[test]
    fn test_print_terminal_reports_success() {
        assert!(sample().print_terminal(false).is_ok());
    }

    #[test]
    fn test_marker_helpers() {
        assert!(okay("fine").contains("[+] fine"));
        assert!(note("look").contains("[~] look"));
        assert!(fail("broke").contains("[-] broke"));
    }
}
