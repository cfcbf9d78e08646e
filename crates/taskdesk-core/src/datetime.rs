use anyhow::{
  Context,
  anyhow
};
use chrono::{
  DateTime,
  FixedOffset,
  LocalResult,
  NaiveDate,
  NaiveDateTime,
  Offset,
  TimeZone,
  Utc
};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%d %H:%M"
];

const DATETIME_LOCAL_FORMAT: &str =
  "%Y-%m-%dT%H:%M";

const DISPLAY_FORMAT: &str =
  "%b %-d, %Y, %I:%M %p";

/// What `Date.prototype.toLocaleString`
/// yields for an unparseable input.
pub const INVALID_DATE: &str =
  "Invalid Date";

/// The viewer's time zone, asked per
/// date so daylight-saving transitions
/// between now and a due date are
/// honored.
pub trait LocalZone {
  /// Offset in effect at a wall-clock
  /// time.
  fn offset_at_local(
    &self,
    naive: NaiveDateTime
  ) -> FixedOffset;

  /// Offset in effect at an instant.
  fn offset_at_utc(
    &self,
    at: DateTime<Utc>
  ) -> FixedOffset;
}

impl LocalZone for FixedOffset {
  fn offset_at_local(
    &self,
    _naive: NaiveDateTime
  ) -> FixedOffset {
    *self
  }

  fn offset_at_utc(
    &self,
    _at: DateTime<Utc>
  ) -> FixedOffset {
    *self
  }
}

/// Builds the browser-local offset from
/// a JS `getTimezoneOffset()` value,
/// which counts minutes *west* of UTC.
pub fn offset_from_js_minutes(
  minutes_west: f64
) -> FixedOffset {
  let seconds =
    (minutes_west * 60.0).round() as i32;
  FixedOffset::west_opt(seconds)
    .unwrap_or_else(|| {
      tracing::warn!(
        minutes_west,
        "timezone offset out of range; \
         using UTC"
      );
      utc_offset()
    })
}

fn utc_offset() -> FixedOffset {
  Utc.fix()
}

/// Parses a due-date attribute into a
/// UTC instant.
///
/// Values carrying an offset are taken
/// as-is; bare date-times and dates are
/// read in `zone` at that date (dates
/// resolve to midnight).
#[tracing::instrument(skip(zone), fields(input = raw))]
pub fn parse_due<Z: LocalZone>(
  raw: &str,
  zone: &Z
) -> anyhow::Result<DateTime<Utc>> {
  let token = raw.trim();
  if token.is_empty() {
    return Err(anyhow!(
      "due date is empty"
    ));
  }

  if let Ok(dt) =
    DateTime::parse_from_rfc3339(token)
  {
    return Ok(dt.with_timezone(&Utc));
  }

  for format in NAIVE_DATETIME_FORMATS {
    if let Ok(naive) =
      NaiveDateTime::parse_from_str(
        token, format
      )
    {
      return from_local(naive, zone);
    }
  }

  let date = NaiveDate::parse_from_str(
    token, "%Y-%m-%d"
  )
  .with_context(|| {
    format!(
      "unrecognized due date: {token}"
    )
  })?;
  let midnight = date
    .and_hms_opt(0, 0, 0)
    .ok_or_else(|| {
      anyhow!(
        "failed to construct midnight \
         for {date}"
      )
    })?;
  from_local(midnight, zone)
}

fn from_local<Z: LocalZone>(
  naive: NaiveDateTime,
  zone: &Z
) -> anyhow::Result<DateTime<Utc>> {
  let offset = zone.offset_at_local(naive);
  match offset.from_local_datetime(&naive)
  {
    | LocalResult::Single(dt) => {
      Ok(dt.with_timezone(&Utc))
    }
    | LocalResult::Ambiguous(first, _) => {
      Ok(first.with_timezone(&Utc))
    }
    | LocalResult::None => Err(anyhow!(
      "local datetime does not exist: \
       {naive}"
    ))
  }
}

/// `min` value for a
/// `datetime-local` input: the current
/// local minute.
#[must_use]
pub fn datetime_local_min<Z: LocalZone>(
  now: DateTime<Utc>,
  zone: &Z
) -> String {
  now
    .with_timezone(&zone.offset_at_utc(now))
    .format(DATETIME_LOCAL_FORMAT)
    .to_string()
}

/// Human-readable rendering, e.g.
/// `Oct 19, 2026, 03:45 PM`.
pub fn format_display_date<Z: LocalZone>(
  raw: &str,
  zone: &Z
) -> anyhow::Result<String> {
  let due = parse_due(raw, zone)?;
  Ok(
    due
      .with_timezone(&zone.offset_at_utc(due))
      .format(DISPLAY_FORMAT)
      .to_string()
  )
}

/// Like [`format_display_date`], but
/// never fails: unparseable input
/// renders as [`INVALID_DATE`].
#[must_use]
pub fn display_date_or_invalid<Z: LocalZone>(
  raw: &str,
  zone: &Z
) -> String {
  format_display_date(raw, zone)
    .unwrap_or_else(|err| {
      tracing::warn!(
        input = raw,
        error = %err,
        "cannot format date"
      );
      INVALID_DATE.to_string()
    })
}
