use url::Url;

use super::{
    classifier::LineClassifier,
    rules::{self, TagRule},
    state::ParserState,
};
use crate::{
    error::{LineError, ParseError},
    hls::Playlist,
};

/// Line-oriented M3U8 parser driven by a set of tag rules.
pub struct PlaylistParser {
    base: Url,
    state: ParserState,
    rules: Vec<Box<dyn TagRule>>,
}

impl PlaylistParser {
    /// `base` is the URL the playlist was fetched from; relative URIs resolve
    /// against its directory.
    pub fn new(base: Url, rules: Vec<Box<dyn TagRule>>) -> Self {
        Self {
            base,
            state: ParserState::new(),
            rules,
        }
    }

    pub fn with_default_rules(base: Url) -> Self {
        Self::new(base, rules::default_rules())
    }

    /// Parse an entire playlist document.
    pub fn parse(mut self, input: &str) -> Result<Playlist, ParseError> {
        for (idx, line) in input.lines().enumerate() {
            self.process_line(line).map_err(|e| e.at(idx + 1))?;
        }

        if !self.state.is_extended {
            return Err(ParseError::NotExtendedM3u);
        }

        Ok(self.state.into_playlist())
    }

    /// Process a single line.
    pub fn process_line(&mut self, line: &str) -> Result<(), LineError> {
        let line_type = LineClassifier::classify(line);
        let line = line.trim();

        if line_type.is_uri() {
            let url = self.resolve(line)?;
            self.state.complete(url);
            return Ok(());
        }

        if line_type.is_ignored() {
            return Ok(());
        }

        match self.rules.iter().find(|rule| rule.matches(&line_type)) {
            Some(rule) => rule.apply(line, &mut self.state),
            None => Ok(()),
        }
    }

    /// Absolute references are used verbatim. Relative ones are joined onto the
    /// playlist's directory and inherit the playlist's query unless they carry
    /// their own.
    fn resolve(&self, reference: &str) -> Result<Url, LineError> {
        let resolved = match Url::parse(reference) {
            Err(url::ParseError::RelativeUrlWithoutBase) => self.join_relative(reference),
            absolute => absolute,
        };

        resolved.map_err(|source| LineError::UrlJoin {
            reference: reference.to_string(),
            source,
        })
    }

    fn join_relative(&self, reference: &str) -> Result<Url, url::ParseError> {
        let mut directory = self.base.clone();
        directory.set_query(None);
        directory.set_fragment(None);

        let mut url = directory.join(reference)?;
        if url.query().is_none() {
            url.set_query(self.base.query());
        }
        Ok(url)
    }

    /// Get current state (for inspection/testing).
    pub fn state(&self) -> &ParserState {
        &self.state
    }
}

/// Parse `text` as a playlist fetched from `base`.
pub fn parse(base: &Url, text: &str) -> Result<Playlist, ParseError> {
    PlaylistParser::with_default_rules(base.clone()).parse(text)
}
