//! # Byte-Stream Parser
//!
//! This module provides the state machine that consumes an NMEA 0183 stream one
//! byte at a time. It handles the standard format: `$HHH,D1,D2,...,Dn*CC\r\n`
//!
//! The stream is split into terms at `,`, `*`, `\r` and `\n`. Each term is
//! decoded into the staged copy of the field it belongs to, and the staged
//! copies are committed together once the checksum term matches the running
//! XOR of every byte between `$` and `*`. A sentence that fails its checksum
//! leaves every committed value untouched, and what it staged is dropped so
//! that a later sentence cannot publish it.

use heapless::Vec;

use crate::{
    Altitude, Clock, Course, CustomField, CustomFieldId, Date, Field, FixMode, FixQuality, Hdop,
    Location, MAX_TERM_LEN, NumericMode, Registry, RegistryError, SentenceKind, Speed, Status,
    Time, decode::decode_checksum, sentence::Target,
};

/// Default number of custom fields a parser can hold.
pub const DEFAULT_CUSTOM_FIELDS: usize = 8;

/// Creates a configurable [`StreamParser`].
///
/// It uses the builder pattern to allow for flexible configuration of the parser settings.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{ManualClock, NumericMode, StreamParser, StreamParserBuilder};
///
/// // Default settings: lenient numeric decoding
/// let parser = StreamParserBuilder::new().build(ManualClock::new(0));
/// assert_eq!(parser.numeric_mode(), NumericMode::Lenient);
///
/// // Reject sentences with malformed numbers, room for 2 custom fields
/// let parser: StreamParser<_, 2> = StreamParserBuilder::new()
///     .numeric_mode(NumericMode::Strict)
///     .build_with_capacity(ManualClock::new(0));
/// assert_eq!(parser.numeric_mode(), NumericMode::Strict);
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamParserBuilder {
    /// Numeric decoding mode for the parser.
    numeric_mode: NumericMode,
}

impl StreamParserBuilder {
    /// Creates a new builder with default settings.
    ///
    /// The default settings are:
    /// - Numeric mode: [`NumericMode::Lenient`]
    pub fn new() -> Self {
        StreamParserBuilder {
            numeric_mode: NumericMode::Lenient,
        }
    }

    /// Sets how numeric terms are decoded.
    ///
    /// # Arguments
    ///
    /// * `mode` - The desired numeric mode:
    ///   - [`NumericMode::Lenient`]: the numeric prefix of a term is used
    ///   - [`NumericMode::Strict`]: a malformed term rejects its sentence
    pub fn numeric_mode(mut self, mode: NumericMode) -> Self {
        self.numeric_mode = mode;
        self
    }

    /// Builds a parser with room for [`DEFAULT_CUSTOM_FIELDS`] custom fields.
    pub fn build<C: Clock>(self, clock: C) -> StreamParser<C> {
        self.build_with_capacity(clock)
    }

    /// Builds a parser with room for `N` custom fields.
    pub fn build_with_capacity<C: Clock, const N: usize>(self, clock: C) -> StreamParser<C, N> {
        StreamParser {
            location: Field::default(),
            date: Field::default(),
            time: Field::default(),
            speed: Field::default(),
            course: Field::default(),
            altitude: Field::default(),
            satellites: Field::default(),
            hdop: Field::default(),
            clock,
            numeric_mode: self.numeric_mode,
            custom: Registry::new(),
            term: Vec::new(),
            term_truncated: false,
            term_index: 0,
            parity: 0,
            kind: SentenceKind::Other,
            checksum_term: false,
            has_fix: false,
            rejected: false,
            chars_processed: 0,
            sentences_with_fix: 0,
            failed_checksum: 0,
            passed_checksum: 0,
            sentences_rejected: 0,
            terms_truncated: 0,
        }
    }
}

/// Incremental NMEA 0183 decoder keeping the latest valid fix.
///
/// Feed it bytes with [`StreamParser::encode`]; read the decoded values from its
/// public fields. A single instance serves one stream and is not meant to be
/// shared between threads while it is being fed.
///
/// ```rust
/// use nmea0183_stream::{ManualClock, StreamParser};
///
/// let mut gps = StreamParser::new(ManualClock::new(0));
/// let completed = gps.encode_slice(
///     b"$GPRMC,045103.000,A,3014.1984,N,09749.2872,W,0.67,161.46,030913,,,A*7C\r\n",
/// );
///
/// assert_eq!(completed, 1);
/// assert!(gps.location.is_valid());
/// assert!((gps.location.lat() - 30.23664).abs() < 1e-6);
/// assert!((gps.location.lng() + 97.821453).abs() < 1e-6);
/// assert_eq!(gps.date.year(), 2013);
/// assert_eq!(gps.time.minute(), 51);
/// ```
#[derive(Debug)]
pub struct StreamParser<C, const N: usize = DEFAULT_CUSTOM_FIELDS> {
    /// Position with fix indicators
    pub location: Field<Location>,
    /// UTC date
    pub date: Field<Date>,
    /// UTC time
    pub time: Field<Time>,
    /// Speed over ground
    pub speed: Field<Speed>,
    /// Course over ground
    pub course: Field<Course>,
    /// Altitude above mean sea level
    pub altitude: Field<Altitude>,
    /// Satellites used in the fix
    pub satellites: Field<u32>,
    /// Horizontal dilution of precision
    pub hdop: Field<Hdop>,

    clock: C,
    numeric_mode: NumericMode,
    custom: Registry<N>,

    term: Vec<u8, MAX_TERM_LEN>,
    term_truncated: bool,
    term_index: u8,
    parity: u8,
    kind: SentenceKind,
    checksum_term: bool,
    has_fix: bool,
    rejected: bool,

    chars_processed: u32,
    sentences_with_fix: u32,
    failed_checksum: u32,
    passed_checksum: u32,
    sentences_rejected: u32,
    terms_truncated: u32,
}

impl<C: Clock> StreamParser<C> {
    /// Creates a parser with default settings, see [`StreamParserBuilder`].
    pub fn new(clock: C) -> Self {
        StreamParserBuilder::new().build(clock)
    }
}

impl<C: Clock, const N: usize> StreamParser<C, N> {
    /// Processes one byte of the stream.
    ///
    /// Returns `true` exactly when the byte completed a sentence whose
    /// checksum is valid and whose values were committed.
    pub fn encode(&mut self, byte: u8) -> bool {
        self.chars_processed = self.chars_processed.wrapping_add(1);

        match byte {
            b',' => {
                self.parity ^= byte;
                self.end_of_term(false)
            }
            b'\r' | b'\n' => self.end_of_term(false),
            b'*' => self.end_of_term(true),
            b'$' => {
                self.discard_sentence();
                self.term_index = 0;
                self.term.clear();
                self.term_truncated = false;
                self.parity = 0;
                self.kind = SentenceKind::Other;
                self.checksum_term = false;
                self.has_fix = false;
                self.rejected = false;
                false
            }
            _ => {
                if self.term.push(byte).is_err() {
                    self.term_truncated = true;
                }
                if !self.checksum_term {
                    self.parity ^= byte;
                }
                false
            }
        }
    }

    /// Processes a whole buffer; returns how many valid sentences it completed.
    pub fn encode_slice(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().filter(|&&b| self.encode(b)).count()
    }

    fn end_of_term(&mut self, checksum_follows: bool) -> bool {
        if self.term_truncated {
            self.terms_truncated = self.terms_truncated.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::trace!("term {} truncated to {} bytes", self.term_index, MAX_TERM_LEN);
        }

        let valid_sentence = self.dispatch_term();

        self.term_index = self.term_index.saturating_add(1);
        self.term.clear();
        self.term_truncated = false;
        self.checksum_term = checksum_follows;

        valid_sentence
    }

    fn dispatch_term(&mut self) -> bool {
        let term = term_str(&self.term);

        if self.checksum_term {
            let found = decode_checksum(term);
            return self.end_of_sentence(found);
        }

        if self.term_index == 0 {
            self.kind = SentenceKind::classify(term);
            self.custom.begin_sentence(term);
            return false;
        }

        if let Some(&first) = term.as_bytes().first()
            && let Some(target) = self.kind.route(self.term_index)
        {
            let mode = self.numeric_mode;
            let decoded = match target {
                Target::Time => mode
                    .fixed_point(term)
                    .map(|v| self.time.stage(Time(v as u32))),
                Target::Status => {
                    self.has_fix = Status::from_term(term) == Some(Status::Valid);
                    Some(())
                }
                Target::Latitude => mode
                    .degrees(term)
                    .map(|raw| self.location.staged_mut().lat = raw),
                Target::NorthSouth => {
                    self.location.staged_mut().lat.negative = first == b'S';
                    Some(())
                }
                Target::Longitude => mode
                    .degrees(term)
                    .map(|raw| self.location.staged_mut().lng = raw),
                Target::EastWest => {
                    self.location.staged_mut().lng.negative = first == b'W';
                    Some(())
                }
                Target::Speed => mode.fixed_point(term).map(|v| self.speed.stage(Speed(v))),
                Target::Course => mode.fixed_point(term).map(|v| self.course.stage(Course(v))),
                Target::Date => mode.unsigned(term).map(|v| self.date.stage(Date(v))),
                Target::FixQuality => {
                    self.has_fix = first > b'0';
                    self.location.staged_mut().quality = FixQuality::from_term(term);
                    Some(())
                }
                Target::Satellites => mode.unsigned(term).map(|v| self.satellites.stage(v)),
                Target::Hdop => mode.fixed_point(term).map(|v| self.hdop.stage(Hdop(v))),
                Target::Altitude => mode
                    .fixed_point(term)
                    .map(|v| self.altitude.stage(Altitude(v))),
                Target::FixMode => {
                    self.location.staged_mut().mode = FixMode::from_term(term);
                    Some(())
                }
            };

            if decoded.is_none() {
                self.rejected = true;
            }
        }

        self.custom.stage(self.term_index, term);
        false
    }

    fn end_of_sentence(&mut self, found: Option<u8>) -> bool {
        if found != Some(self.parity) {
            self.failed_checksum = self.failed_checksum.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "checksum mismatch: expected {=u8:#x}, found {}",
                self.parity,
                found
            );
            self.discard_sentence();
            return false;
        }

        self.passed_checksum = self.passed_checksum.wrapping_add(1);

        if self.rejected {
            self.sentences_rejected = self.sentences_rejected.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::debug!("{} sentence rejected: malformed numeric term", self.kind);
            self.discard_sentence();
            return false;
        }

        if self.has_fix {
            self.sentences_with_fix = self.sentences_with_fix.wrapping_add(1);
        }

        let now = self.clock.now_ms();
        match self.kind {
            SentenceKind::Rmc => {
                self.date.commit(now);
                self.time.commit(now);
                if self.has_fix {
                    self.location.commit(now);
                    self.speed.commit(now);
                    self.course.commit(now);
                }
            }
            SentenceKind::Gga => {
                self.time.commit(now);
                if self.has_fix {
                    self.location.commit(now);
                    self.altitude.commit(now);
                }
                self.satellites.commit(now);
                self.hdop.commit(now);
            }
            SentenceKind::Other => {}
        }
        self.custom.commit_window(now);

        #[cfg(feature = "defmt")]
        defmt::trace!("{} sentence committed, fix: {}", self.kind, self.has_fix);

        true
    }

    /// Drops everything the in-flight sentence staged.
    fn discard_sentence(&mut self) {
        self.location.discard();
        self.date.discard();
        self.time.discard();
        self.speed.discard();
        self.course.discard();
        self.altitude.discard();
        self.satellites.discard();
        self.hdop.discard();
        self.custom.discard_window();
    }

    /// Registers a custom field for term `term_index` of `sentence`.
    ///
    /// `sentence` is the full identifier including the talker, e.g. `GPGSA`, and
    /// `term_index` counts from 1 for the first term after the identifier.
    ///
    /// ```rust
    /// use nmea0183_stream::{ManualClock, StreamParser};
    ///
    /// let mut gps = StreamParser::new(ManualClock::new(0));
    /// let pdop = gps.register_custom("GPGSA", 15).unwrap();
    ///
    /// gps.encode_slice(b"$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39\r\n");
    /// assert_eq!(gps.custom_mut(pdop).value(), "2.5");
    /// ```
    pub fn register_custom(
        &mut self,
        sentence: &str,
        term_index: u8,
    ) -> Result<CustomFieldId, RegistryError> {
        self.custom.register(sentence, term_index)
    }

    /// A registered custom field.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different parser and is out of range here.
    pub fn custom(&self, id: CustomFieldId) -> &CustomField {
        &self.custom[id]
    }

    /// A registered custom field, mutably so that its value can be read.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different parser and is out of range here.
    pub fn custom_mut(&mut self, id: CustomFieldId) -> &mut CustomField {
        &mut self.custom[id]
    }

    /// All registered custom fields.
    pub fn registry(&self) -> &Registry<N> {
        &self.custom
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn numeric_mode(&self) -> NumericMode {
        self.numeric_mode
    }

    /// Bytes fed to [`StreamParser::encode`] so far.
    pub fn chars_processed(&self) -> u32 {
        self.chars_processed
    }

    /// Valid sentences that declared a fix.
    pub fn sentences_with_fix(&self) -> u32 {
        self.sentences_with_fix
    }

    /// Sentences discarded because of a checksum mismatch.
    pub fn failed_checksum(&self) -> u32 {
        self.failed_checksum
    }

    /// Sentences whose checksum matched.
    pub fn passed_checksum(&self) -> u32 {
        self.passed_checksum
    }

    /// Checksum-valid sentences discarded in [`NumericMode::Strict`].
    pub fn sentences_rejected(&self) -> u32 {
        self.sentences_rejected
    }

    /// Terms longer than [`MAX_TERM_LEN`], decoded from their first bytes only.
    pub fn terms_truncated(&self) -> u32 {
        self.terms_truncated
    }

    /// Combined UTC date and time, when both have been committed.
    ///
    /// Reading clears the updated flag of both fields.
    #[cfg(feature = "time")]
    pub fn date_time(&mut self) -> Option<time::PrimitiveDateTime> {
        if !self.date.is_valid() || !self.time.is_valid() {
            return None;
        }
        let date = self.date.value().to_date()?;
        let time = self.time.value().to_time()?;
        Some(time::PrimitiveDateTime::new(date, time))
    }
}

/// The longest valid UTF-8 prefix of a term.
fn term_str(term: &[u8]) -> &str {
    match core::str::from_utf8(term) {
        Ok(term) => term,
        Err(e) => core::str::from_utf8(&term[..e.valid_up_to()]).unwrap_or_default(),
    }
}
