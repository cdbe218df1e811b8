//! Expansion of `%` escapes in the argument of `run(...)`.
//!
//! | escape | value |
//! |---|---|
//! | `%f` | document file name |
//! | `%b` | file name without its extension |
//! | `%u` | link under the pointer, URL-escaped |
//! | `%p` | page in the middle of the window |
//! | `%x %y %X %Y` | selection corners (0 when nothing is selected) |
//! | `%i %j %k` | page and PDF coordinates under the pointer |
//!
//! Any other character after `%` is copied as is, so `%%` is a literal
//! percent sign. A trailing lone `%` is kept.

use std::fmt::Write;
use std::path::Path;

use super::tab::Selection;

/// Everything the escapes can refer to.
#[derive(Debug, Clone, Default)]
pub struct RunContext<'a> {
    pub file: Option<&'a Path>,
    pub link_info: Option<String>,
    pub mid_page: usize,
    pub selection: Option<Selection>,
    /// `(page, x, y)`; page 0 when the pointer is not over a page.
    pub mouse: (usize, f64, f64),
}

const URL_SAFE: &[u8] = b"-_.~/?:@&=+,#%";

/// Escape every byte outside the unreserved URL set as `%xx`.
pub fn munge_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for b in url.bytes() {
        if b.is_ascii_alphanumeric() || URL_SAFE.contains(&b) {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{b:02x}");
        }
    }
    out
}

/// Format like C's `%g`: six significant digits, trailing zeros dropped,
/// exponent form outside `1e-4..1e6`.
pub fn format_g(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let sci = format!("{v:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let precision = usize::try_from(5 - exp).unwrap_or(0);
        trim_fraction(&format!("{v:.precision$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

pub fn expand(format: &str, ctx: &RunContext<'_>) -> String {
    let file = ctx.file.map(|f| f.to_string_lossy().into_owned()).unwrap_or_default();
    let sel = ctx
        .selection
        .map_or((0.0, 0.0, 0.0, 0.0), |s| (s.x0, s.y0, s.x1, s.y1));

    let mut out = String::new();
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('%');
            break;
        };
        match escape {
            'f' => out.push_str(&file),
            'b' => match file.rfind('.') {
                Some(dot) => out.push_str(&file[..dot]),
                None => out.push_str(&file),
            },
            'u' => out.push_str(&munge_url(ctx.link_info.as_deref().unwrap_or(""))),
            'p' => {
                let _ = write!(out, "{}", ctx.mid_page);
            }
            'x' => out.push_str(&format_g(sel.0)),
            'y' => out.push_str(&format_g(sel.1)),
            'X' => out.push_str(&format_g(sel.2)),
            'Y' => out.push_str(&format_g(sel.3)),
            'i' => {
                let _ = write!(out, "{}", ctx.mouse.0);
            }
            'j' => out.push_str(&format_g(ctx.mouse.1)),
            'k' => out.push_str(&format_g(ctx.mouse.2)),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RunContext<'static> {
        RunContext {
            file: Some(Path::new("/docs/report.v2.pdf")),
            link_info: Some("http://example.com/a b?q=<1>".into()),
            mid_page: 7,
            selection: Some(Selection::new(3, 10.0, 20.5, 110.0, 220.0)),
            mouse: (2, 72.0, 36.25),
        }
    }

    #[test]
    fn file_escapes() {
        assert_eq!(expand("lpr %f", &ctx()), "lpr /docs/report.v2.pdf");
        assert_eq!(expand("%b.txt", &ctx()), "/docs/report.v2.txt");

        let no_ext = RunContext {
            file: Some(Path::new("notes")),
            ..RunContext::default()
        };
        assert_eq!(expand("%b", &no_ext), "notes");
    }

    #[test]
    fn page_selection_and_mouse_escapes() {
        assert_eq!(expand("p=%p", &ctx()), "p=7");
        assert_eq!(expand("%x %y %X %Y", &ctx()), "10 20.5 110 220");
        assert_eq!(expand("%i:%j,%k", &ctx()), "2:72,36.25");
    }

    #[test]
    fn coordinates_use_six_significant_digits() {
        assert_eq!(format_g(1e20), "1e+20");
        assert_eq!(format_g(1234567.0), "1.23457e+06");
        assert_eq!(format_g(123456.0), "123456");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(0.00001234), "1.234e-05");
        assert_eq!(format_g(-2.5), "-2.5");
        assert_eq!(format_g(1.0 / 3.0), "0.333333");
        assert_eq!(format_g(f64::INFINITY), "inf");

        let far = RunContext {
            selection: Some(Selection::new(1, 0.0, 0.0, 1e20, 0.5)),
            ..RunContext::default()
        };
        assert_eq!(expand("%X %Y", &far), "1e+20 0.5");
    }

    #[test]
    fn missing_selection_is_zero() {
        let c = RunContext::default();
        assert_eq!(expand("%x,%y,%X,%Y", &c), "0,0,0,0");
        assert_eq!(expand("[%u]", &c), "[]");
    }

    #[test]
    fn link_is_url_escaped() {
        assert_eq!(
            expand("open %u", &ctx()),
            "open http://example.com/a%20b?q=%3c1%3e"
        );
    }

    #[test]
    fn unknown_escapes_and_trailing_percent() {
        assert_eq!(expand("100%% %z", &ctx()), "100% z");
        assert_eq!(expand("50%", &ctx()), "50%");
        assert_eq!(expand("plain", &ctx()), "plain");
    }

    #[test]
    fn munge_keeps_safe_characters() {
        assert_eq!(munge_url("a-b_c.d~e/f?g:h@i&j=k+l,m#n%o"), "a-b_c.d~e/f?g:h@i&j=k+l,m#n%o");
        assert_eq!(munge_url("\"é\""), "%22%c3%a9%22");
    }
}
