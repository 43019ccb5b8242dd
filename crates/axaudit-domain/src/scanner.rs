use std::collections::BTreeMap;
use std::io::{self, Read};

/// One event from a forward-only scan of a serialized layout description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    StartTag {
        name: String,
        attributes: BTreeMap<String, String>,
    },
    EndTag {
        name: String,
    },
    EndOfDocument,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("descriptor stream error: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected end of descriptor inside a tag")]
    UnexpectedEof,

    #[error("malformed tag near byte {offset}: {detail}")]
    MalformedTag { offset: usize, detail: &'static str },
}

/// Forward-only scanner over a serialized layout description.
///
/// Advances one tag at a time and never buffers the whole document. The
/// stream is not restartable: each scan opens a fresh reader, and the
/// reader is released when the scanner drops, on every exit path
/// including parse failure. Stopping consumption early is safe at any
/// point.
///
/// Recognized markup: start tags with quoted attributes, self-closing
/// tags, end tags, comments, and processing instructions. Text content
/// between tags is skipped.
pub struct LayoutScanner<R: Read> {
    reader: R,
    peeked: Option<u8>,
    offset: usize,
    done: bool,
}

impl<R: Read> LayoutScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
            offset: 0,
            done: false,
        }
    }

    fn read_raw(&mut self) -> Result<Option<u8>, ScanError> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.offset += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ScanError::Io(e)),
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, ScanError> {
        if let Some(b) = self.peeked.take() {
            return Ok(Some(b));
        }
        self.read_raw()
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, ScanError> {
        if self.peeked.is_none() {
            self.peeked = self.read_raw()?;
        }
        Ok(self.peeked)
    }

    fn malformed(&self, detail: &'static str) -> ScanError {
        ScanError::MalformedTag {
            offset: self.offset,
            detail,
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), ScanError> {
        while let Some(b) = self.peek_byte()? {
            if b.is_ascii_whitespace() {
                self.next_byte()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn is_name_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
    }

    fn read_name(&mut self) -> Result<String, ScanError> {
        let mut name = Vec::new();
        while let Some(b) = self.peek_byte()? {
            if Self::is_name_byte(b) {
                self.next_byte()?;
                name.push(b);
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(self.malformed("expected a name"));
        }
        String::from_utf8(name).map_err(|_| self.malformed("name is not valid utf-8"))
    }

    /// Skip `<!...>` markup (comments, doctype-like declarations).
    fn skip_bang(&mut self) -> Result<(), ScanError> {
        // Comments require a closing "-->"; other bang markup ends at '>'.
        if self.peek_byte()? == Some(b'-') {
            self.next_byte()?;
            if self.next_byte()?.ok_or(ScanError::UnexpectedEof)? != b'-' {
                return Err(self.malformed("expected comment opener"));
            }
            let mut dashes = 0u8;
            loop {
                match self.next_byte()?.ok_or(ScanError::UnexpectedEof)? {
                    b'-' => dashes = dashes.saturating_add(1),
                    b'>' if dashes >= 2 => return Ok(()),
                    _ => dashes = 0,
                }
            }
        }
        loop {
            if self.next_byte()?.ok_or(ScanError::UnexpectedEof)? == b'>' {
                return Ok(());
            }
        }
    }

    /// Skip `<?...?>` processing instructions.
    fn skip_instruction(&mut self) -> Result<(), ScanError> {
        let mut question = false;
        loop {
            match self.next_byte()?.ok_or(ScanError::UnexpectedEof)? {
                b'?' => question = true,
                b'>' if question => return Ok(()),
                _ => question = false,
            }
        }
    }

    fn read_attribute_value(&mut self) -> Result<String, ScanError> {
        let quote = match self.next_byte()?.ok_or(ScanError::UnexpectedEof)? {
            q @ (b'"' | b'\'') => q,
            _ => return Err(self.malformed("attribute value must be quoted")),
        };
        let mut value = Vec::new();
        loop {
            let b = self.next_byte()?.ok_or(ScanError::UnexpectedEof)?;
            if b == quote {
                break;
            }
            value.push(b);
        }
        String::from_utf8(value).map_err(|_| self.malformed("attribute value is not valid utf-8"))
    }

    fn read_start_tag(&mut self) -> Result<LayoutEvent, ScanError> {
        let name = self.read_name()?;
        let mut attributes = BTreeMap::new();

        loop {
            self.skip_whitespace()?;
            match self.peek_byte()?.ok_or(ScanError::UnexpectedEof)? {
                b'>' => {
                    self.next_byte()?;
                    return Ok(LayoutEvent::StartTag { name, attributes });
                }
                b'/' => {
                    self.next_byte()?;
                    if self.next_byte()?.ok_or(ScanError::UnexpectedEof)? != b'>' {
                        return Err(self.malformed("expected '>' after '/'"));
                    }
                    return Ok(LayoutEvent::StartTag { name, attributes });
                }
                _ => {
                    let attr = self.read_name()?;
                    self.skip_whitespace()?;
                    if self.next_byte()?.ok_or(ScanError::UnexpectedEof)? != b'=' {
                        return Err(self.malformed("expected '=' after attribute name"));
                    }
                    self.skip_whitespace()?;
                    let value = self.read_attribute_value()?;
                    attributes.insert(attr, value);
                }
            }
        }
    }

    fn read_end_tag(&mut self) -> Result<LayoutEvent, ScanError> {
        let name = self.read_name()?;
        self.skip_whitespace()?;
        match self.next_byte()?.ok_or(ScanError::UnexpectedEof)? {
            b'>' => Ok(LayoutEvent::EndTag { name }),
            _ => Err(self.malformed("expected '>' in end tag")),
        }
    }

    /// Advance to the next tag event, or `EndOfDocument` at end of input.
    pub fn next_event(&mut self) -> Result<LayoutEvent, ScanError> {
        loop {
            // Skip text content up to the next tag.
            match self.next_byte()? {
                None => return Ok(LayoutEvent::EndOfDocument),
                Some(b'<') => {}
                Some(_) => continue,
            }

            match self.peek_byte()?.ok_or(ScanError::UnexpectedEof)? {
                b'!' => {
                    self.next_byte()?;
                    self.skip_bang()?;
                }
                b'?' => {
                    self.next_byte()?;
                    self.skip_instruction()?;
                }
                b'/' => {
                    self.next_byte()?;
                    return self.read_end_tag();
                }
                b if Self::is_name_byte(b) => return self.read_start_tag(),
                _ => return Err(self.malformed("invalid character after '<'")),
            }
        }
    }
}

impl<R: Read> Iterator for LayoutScanner<R> {
    type Item = Result<LayoutEvent, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_event() {
            Ok(LayoutEvent::EndOfDocument) => {
                self.done = true;
                Some(Ok(LayoutEvent::EndOfDocument))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
            Ok(event) => Some(Ok(event)),
        }
    }
}
