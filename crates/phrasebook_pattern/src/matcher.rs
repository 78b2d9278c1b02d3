//! Backtracking matcher.
//!
//! The matcher walks borrowed node slices with a continuation chain instead of
//! allocating sub-patterns: a cursor points at one node of one slice, and
//! when an alternative's slice runs out, matching resumes at the cursor it was
//! entered from. Every decision point (choice alternatives, optional skips,
//! placeholder splits) tries its options in order and the first one with which
//! the *whole* remaining pattern matches wins.
//!
//! # Spaces
//!
//! A Space node normally consumes exactly one `' '`. Two rules keep optional
//! fragments from demanding doubled or dangling spaces:
//!
//! - **Elision.** A Space that follows a non-space node which consumed
//!   nothing (a skipped optional, say) consumes nothing either, so
//!   `"x [y] z"` accepts `"x z"`.
//! - **Temporary skip.** A Space that cannot consume, but is followed by an
//!   Optional that ends the slice or is followed by another Space, is skipped
//!   provisionally. If one of the optional's alternatives could then match,
//!   the skip is revoked and matching fails at the Space, so `"x [y]"` accepts
//!   `"x"` but rejects `"xy"`. The Space after a skipped optional is never
//!   elided: exactly one space must still separate the neighbours.
//!
//! # Complexity
//!
//! Placeholder and regex spans are found by trying every split point, and a
//! split is only accepted if the rest of the pattern matches. Chains of
//! placeholders or regexes with no literal text between them therefore
//! backtrack exponentially in the worst case.

use crate::node::{Alternative, Node};
use crate::pattern::Pattern;
use crate::result::MatchResult;
use crate::trace::{TraceEvent, Tracer};

/// Matches `input` against `pattern`.
#[must_use]
pub fn match_pattern<'p>(
    pattern: &'p Pattern,
    input: &str,
    allow_leftover: bool,
) -> MatchResult<'p> {
    Matcher::new(pattern, input, allow_leftover).run()
}

/// Where the current space-delimited segment of input began.
#[derive(Clone, Copy, Debug)]
struct Segment<'p> {
    start: usize,
    /// The Space that opened this segment, if it was temporarily skipped.
    skipped: Option<&'p Node>,
}

impl Segment<'_> {
    const fn at(start: usize) -> Self {
        Self {
            start,
            skipped: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Cursor<'p, 'k> {
    nodes: &'p [Node],
    index: usize,
    segment: Segment<'p>,
    resume: Option<&'k Cursor<'p, 'k>>,
}

impl<'p, 'k> Cursor<'p, 'k> {
    fn advance(self, segment: Segment<'p>) -> Self {
        Self {
            index: self.index + 1,
            segment,
            ..self
        }
    }

    fn next(self) -> Self {
        self.advance(self.segment)
    }

    fn previous(&self) -> Option<&'p Node> {
        self.index.checked_sub(1).and_then(|i| self.nodes.get(i))
    }

    fn lookahead(&self, distance: usize) -> Option<&'p Node> {
        self.nodes.get(self.index + distance)
    }

    /// Last node of the top-level pattern.
    fn is_terminal(&self) -> bool {
        self.resume.is_none() && self.index + 1 == self.nodes.len()
    }

    fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cur = self.resume;
        while let Some(outer) = cur {
            depth += 1;
            cur = outer.resume;
        }
        depth
    }

    /// The top-level node `own` is nested in (or `own` itself at top level).
    fn top_level(&self, own: &'p Node) -> &'p Node {
        let mut root = self;
        while let Some(outer) = root.resume {
            root = outer;
        }
        if std::ptr::eq(root, self) {
            return own;
        }
        // Resume cursors already point past the group they were entered from.
        root.previous().unwrap_or(own)
    }

    fn enter<'c>(&'c self, alt: &'p Alternative) -> Cursor<'p, 'c> {
        Cursor {
            nodes: alt.nodes(),
            index: 0,
            segment: self.segment,
            resume: Some(self),
        }
    }
}

struct Failure<'p> {
    position: usize,
    node: Option<&'p Node>,
    acc: MatchResult<'p>,
}

/// A single match attempt of one input against one node sequence.
pub struct Matcher<'p, 'i, 't> {
    root: &'p [Node],
    input: &'i str,
    allow_leftover: bool,
    greedy: bool,
    tracer: Option<&'t mut Tracer>,
    furthest: Option<Failure<'p>>,
}

impl<'p, 'i, 't> Matcher<'p, 'i, 't> {
    /// Prepares to match `input` against `pattern`, honouring its greedy flag.
    #[must_use]
    pub fn new(pattern: &'p Pattern, input: &'i str, allow_leftover: bool) -> Self {
        Self::over(pattern.nodes(), input, allow_leftover, pattern.greedy())
    }

    fn over(root: &'p [Node], input: &'i str, allow_leftover: bool, greedy: bool) -> Self {
        Self {
            root,
            input,
            allow_leftover,
            greedy,
            tracer: None,
            furthest: None,
        }
    }

    /// Records every step into `tracer`.
    #[must_use]
    pub fn with_tracer(mut self, tracer: &'t mut Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Runs the match to completion.
    #[must_use]
    pub fn run(mut self) -> MatchResult<'p> {
        let start = Cursor {
            nodes: self.root,
            index: 0,
            segment: Segment::at(0),
            resume: None,
        };
        let result = match self.step(start, 0, MatchResult::new()) {
            Some(result) => result,
            None => match self.furthest.take() {
                Some(failure) => failure.acc.fail(failure.node),
                None => MatchResult::new().fail(None),
            },
        };

        self.trace(0, || TraceEvent::MatchFinished {
            success: result.is_success(),
            mark: result.mark(),
            leftover: result.leftover().map(str::to_string),
        });
        result
    }

    #[inline]
    fn trace(&mut self, depth: usize, event: impl FnOnce() -> TraceEvent) {
        if let Some(tracer) = self.tracer.as_deref_mut() {
            if tracer.is_enabled() {
                tracer.record(depth, event());
            }
        }
    }

    fn step(
        &mut self,
        cur: Cursor<'p, '_>,
        pos: usize,
        acc: MatchResult<'p>,
    ) -> Option<MatchResult<'p>> {
        let Some(node) = cur.nodes.get(cur.index) else {
            return match cur.resume {
                Some(outer) => self.step(
                    Cursor {
                        segment: cur.segment,
                        ..*outer
                    },
                    pos,
                    acc,
                ),
                None => self.finish(pos, acc),
            };
        };

        self.trace(cur.depth(), || TraceEvent::NodeEnter {
            kind: node.kind_name(),
            grammar: node.to_string(),
            position: pos,
        });

        match node {
            Node::Literal(text) => {
                if self.input[pos..].starts_with(text.as_str()) {
                    self.trace(cur.depth(), || TraceEvent::NodeMatched {
                        kind: node.kind_name(),
                        text: text.clone(),
                        position: pos,
                    });
                    let acc = acc.with_capture(node, text.as_str());
                    self.step(cur.next(), pos + text.len(), acc)
                } else {
                    self.fail_at(&cur, node, pos, acc)
                }
            }
            Node::Space => self.space(cur, node, pos, acc),
            Node::Placeholder(_) | Node::Regex(_) => self.span(cur, node, pos, acc),
            Node::Choice(alts) => {
                let next = cur.next();
                for (index, alt) in alts.iter().enumerate() {
                    if let Some(result) = self.alternative(&next, index, alt, pos, &acc) {
                        return Some(result);
                    }
                }
                self.fail_at(&cur, node, pos, acc)
            }
            Node::Optional(alts) => self.optional(cur, node, alts, pos, acc),
        }
    }

    fn alternative(
        &mut self,
        next: &Cursor<'p, '_>,
        index: usize,
        alt: &'p Alternative,
        pos: usize,
        acc: &MatchResult<'p>,
    ) -> Option<MatchResult<'p>> {
        self.trace(next.depth(), || TraceEvent::AlternativeTried {
            index,
            mark: alt.mark,
            position: pos,
        });
        self.step(next.enter(alt), pos, acc.with_mark(alt.mark))
    }

    fn space(
        &mut self,
        cur: Cursor<'p, '_>,
        node: &'p Node,
        pos: usize,
        acc: MatchResult<'p>,
    ) -> Option<MatchResult<'p>> {
        let follows_empty = cur.previous().is_some_and(|prev| !prev.is_space())
            && pos == cur.segment.start
            && cur.segment.skipped.is_none();
        if follows_empty {
            self.trace(cur.depth(), || TraceEvent::SpaceElided { position: pos });
            return self.step(cur.advance(Segment::at(pos)), pos, acc);
        }

        if self.input[pos..].starts_with(' ') {
            let after = pos + 1;
            let acc = acc.with_capture(node, " ");
            return self.step(cur.advance(Segment::at(after)), after, acc);
        }

        let before_optional = cur.lookahead(1).is_some_and(Node::is_optional)
            && cur.lookahead(2).is_none_or(Node::is_space);
        if before_optional {
            self.trace(cur.depth(), || TraceEvent::SpaceSkipped { position: pos });
            let segment = Segment {
                start: pos,
                skipped: Some(node),
            };
            return self.step(cur.advance(segment), pos, acc);
        }

        self.fail_at(&cur, node, pos, acc)
    }

    fn optional(
        &mut self,
        cur: Cursor<'p, '_>,
        node: &'p Node,
        alts: &'p [Alternative],
        pos: usize,
        acc: MatchResult<'p>,
    ) -> Option<MatchResult<'p>> {
        let next = cur.next();

        let skipped_space = cur.segment.skipped.filter(|space| {
            pos == cur.segment.start && cur.previous().is_some_and(|p| std::ptr::eq(p, *space))
        });
        if let Some(space) = skipped_space {
            // The optional may only be skipped: taking it would glue its text
            // to the preceding node.
            if alts.iter().any(|alt| self.probe(alt, pos)) {
                return self.fail_at(&cur, space, pos, acc);
            }
            return self.step(next, pos, acc);
        }

        for (index, alt) in alts.iter().enumerate() {
            if let Some(result) = self.alternative(&next, index, alt, pos, &acc) {
                return Some(result);
            }
        }

        self.trace(cur.depth(), || TraceEvent::NodeMatched {
            kind: node.kind_name(),
            text: String::new(),
            position: pos,
        });
        self.step(next, pos, acc)
    }

    /// Whether `alt` consumes a non-empty prefix of the input at `pos` on its own.
    fn probe(&self, alt: &'p Alternative, pos: usize) -> bool {
        let result = Matcher::over(alt.nodes(), &self.input[pos..], true, self.greedy).run();
        result.is_success() && result.captures().any(|c| !c.text.is_empty())
    }

    fn span(
        &mut self,
        cur: Cursor<'p, '_>,
        node: &'p Node,
        pos: usize,
        acc: MatchResult<'p>,
    ) -> Option<MatchResult<'p>> {
        let input = self.input;
        let rest = &input[pos..];

        if cur.is_terminal() {
            let end = match node {
                Node::Placeholder(_) => (!rest.is_empty()).then_some(rest.len()),
                Node::Regex(regex) if self.allow_leftover => regex.prefix_len(rest),
                Node::Regex(regex) => regex.is_full_match(rest).then_some(rest.len()),
                _ => None,
            };
            return match end {
                Some(end) => self.take(cur, node, pos, end, acc),
                None => self.fail_at(&cur, node, pos, acc),
            };
        }

        let min = usize::from(matches!(node, Node::Placeholder(_)));
        let mut ends: Vec<usize> = rest
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(rest.len()))
            .filter(|&end| end >= min)
            .collect();
        if self.greedy {
            ends.reverse();
        }

        for end in ends {
            let span = &rest[..end];
            if let Node::Regex(regex) = node {
                if !regex.is_full_match(span) {
                    continue;
                }
            }
            self.trace(cur.depth(), || TraceEvent::SplitTried {
                kind: node.kind_name(),
                span: span.to_string(),
                position: pos,
            });
            if let Some(result) = self.step(cur.next(), pos + end, acc.with_capture(node, span)) {
                return Some(result);
            }
        }

        self.fail_at(&cur, node, pos, acc)
    }

    fn take(
        &mut self,
        cur: Cursor<'p, '_>,
        node: &'p Node,
        pos: usize,
        end: usize,
        acc: MatchResult<'p>,
    ) -> Option<MatchResult<'p>> {
        let input = self.input;
        let text = &input[pos..pos + end];
        self.trace(cur.depth(), || TraceEvent::NodeMatched {
            kind: node.kind_name(),
            text: text.to_string(),
            position: pos,
        });
        let acc = acc.with_capture(node, text);
        self.step(cur.next(), pos + end, acc)
    }

    fn finish(&mut self, pos: usize, acc: MatchResult<'p>) -> Option<MatchResult<'p>> {
        if pos == self.input.len() {
            Some(acc.succeed(None))
        } else if self.allow_leftover {
            Some(acc.succeed(Some(self.input[pos..].to_string())))
        } else {
            self.note_failure(pos, None, acc);
            None
        }
    }

    fn fail_at(
        &mut self,
        cur: &Cursor<'p, '_>,
        node: &'p Node,
        pos: usize,
        acc: MatchResult<'p>,
    ) -> Option<MatchResult<'p>> {
        self.trace(cur.depth(), || TraceEvent::NodeFailed {
            kind: node.kind_name(),
            position: pos,
        });
        self.note_failure(pos, Some(cur.top_level(node)), acc);
        None
    }

    /// Keeps the failure at the furthest input position; ties keep the first.
    fn note_failure(&mut self, position: usize, node: Option<&'p Node>, acc: MatchResult<'p>) {
        if self.furthest.as_ref().is_some_and(|f| f.position >= position) {
            return;
        }
        self.furthest = Some(Failure {
            position,
            node,
            acc,
        });
    }
}
