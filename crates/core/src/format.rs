use chrono::NaiveDate;
use url::Url;

use crate::types::Segment;

const SECONDS_PER_DAY: i64 = 86_400;
const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

/// Format seconds as an `HH:MM:SS,mmm` subtitle-style timestamp.
///
/// The value is an offset into a zero epoch at whole-second precision, so the
/// fraction is truncated and the clock wraps after 24 hours in both
/// directions, so `-3` reads `23:59:57`. Non-finite input formats as zero.
pub fn format_timestamp(seconds: f64) -> String {
    let whole = if seconds.is_finite() {
        seconds.trunc() as i64
    } else {
        0
    };
    let of_day = whole.rem_euclid(SECONDS_PER_DAY);
    let hours = of_day / 3600;
    let mins = (of_day % 3600) / 60;
    let secs = of_day % 60;
    format!("{:02}:{:02}:{:02},000", hours, mins, secs)
}

/// Calendar date as shown on list cards, e.g. `9/2/2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Embeddable player URL for a YouTube watch URL.
///
/// Reads the `v` query parameter; `None` when the URL has no usable id.
pub fn embed_url(source_url: &str) -> Option<String> {
    let url = Url::parse(source_url).ok()?;
    let raw = url
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())?;

    let video_id: String = raw
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if video_id.is_empty() {
        return None;
    }
    Some(format!("{}/{}", EMBED_BASE_URL, video_id))
}

/// One rendered transcript row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine<'a> {
    pub start: String,
    pub end: String,
    pub speaker: &'a str,
    pub text: &'a str,
}

/// Lazily format transcript segments in source order.
pub fn transcript_lines(segments: &[Segment]) -> impl Iterator<Item = TranscriptLine<'_>> {
    segments.iter().map(|seg| TranscriptLine {
        start: format_timestamp(seg.start),
        end: format_timestamp(seg.end),
        speaker: seg.speaker.as_str(),
        text: seg.text.trim(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, end: f64, speaker: &str, text: &str) -> Segment {
        Segment {
            start,
            end,
            speaker: speaker.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn timestamps_use_subtitle_layout() {
        assert_eq!(format_timestamp(75.0), "00:01:15,000");
        assert_eq!(format_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_timestamp(3_725.0), "01:02:05,000");
    }

    #[test]
    fn timestamps_truncate_fraction_and_wrap_daily() {
        assert_eq!(format_timestamp(75.9), "00:01:15,000");
        assert_eq!(format_timestamp(86_400.0 + 61.0), "00:01:01,000");
    }

    #[test]
    fn negative_timestamps_wrap_back_from_midnight() {
        assert_eq!(format_timestamp(-3.0), "23:59:57,000");
        assert_eq!(format_timestamp(-3.7), "23:59:57,000");
        assert_eq!(format_timestamp(-86_400.0), "00:00:00,000");
    }

    #[test]
    fn non_finite_timestamps_format_as_zero() {
        assert_eq!(format_timestamp(f64::NAN), "00:00:00,000");
        assert_eq!(format_timestamp(f64::INFINITY), "00:00:00,000");
    }

    #[test]
    fn embed_url_reads_video_param() {
        let embed = embed_url("https://youtube.com/watch?v=abc123").unwrap();
        assert!(embed.contains("abc123"));
        assert_eq!(embed, "https://www.youtube.com/embed/abc123");

        assert_eq!(
            embed_url("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ&t=42").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn embed_url_without_video_param_is_none() {
        assert_eq!(embed_url("https://youtube.com/watch?list=PL1"), None);
        assert_eq!(embed_url("https://youtube.com/watch"), None);
        assert_eq!(embed_url("https://youtube.com/watch?v="), None);
        assert_eq!(embed_url("not a url"), None);
    }

    #[test]
    fn transcript_lines_keep_source_order() {
        let segments = vec![
            segment(0.0, 4.0, "SPEAKER_00", "  Good afternoon. "),
            segment(4.0, 75.0, "SPEAKER_01", "Thanks, coach."),
        ];

        let lines: Vec<_> = transcript_lines(&segments).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Good afternoon.");
        assert_eq!(lines[1].speaker, "SPEAKER_01");
        assert_eq!(lines[1].end, "00:01:15,000");
        assert_eq!(lines[0].start, "00:00:00,000");
        assert_eq!(lines[0].end, "00:00:04,000");
    }

    #[test]
    fn dates_render_month_first() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        assert_eq!(format_date(date), "9/2/2024");
    }
}
