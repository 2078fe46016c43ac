use crate::IseriesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Lex,
    MarkerCountMismatch,
    UnsupportedConstruct,
    Backend,
    Config,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lex => "ISERIES_ERROR_LEX",
            Self::MarkerCountMismatch => "ISERIES_ERROR_MARKER_COUNT_MISMATCH",
            Self::UnsupportedConstruct => "ISERIES_ERROR_UNSUPPORTED_CONSTRUCT",
            Self::Backend => "ISERIES_ERROR_BACKEND",
            Self::Config => "ISERIES_ERROR_CONFIG",
        }
    }

    pub const fn all() -> &'static [Self] {
        &[
            Self::Lex,
            Self::MarkerCountMismatch,
            Self::UnsupportedConstruct,
            Self::Backend,
            Self::Config,
        ]
    }
}

fn build_error(code: ErrorCode, title: &str, description: &str) -> IseriesError {
    IseriesError::new(code, title, description)
}

pub(crate) fn unterminated_literal_error(offset: usize, delimiter: char) -> IseriesError {
    build_error(
        ErrorCode::Lex,
        "Unterminated quoted literal",
        &format!("quoted literal opened with {delimiter} is never closed"),
    )
    .at(offset)
}

pub(crate) fn unterminated_comment_error(offset: usize) -> IseriesError {
    build_error(
        ErrorCode::Lex,
        "Unterminated comment",
        "block comment opened with /* is never closed",
    )
    .at(offset)
}

pub(crate) fn unmatched_close_paren_error(offset: usize) -> IseriesError {
    build_error(
        ErrorCode::Lex,
        "Unbalanced parentheses",
        "closing parenthesis has no matching opening parenthesis",
    )
    .at(offset)
}

pub(crate) fn unclosed_paren_error(offset: usize, open_depth: usize) -> IseriesError {
    build_error(
        ErrorCode::Lex,
        "Unbalanced parentheses",
        &format!("opening parenthesis is never closed ({open_depth} still open at end of statement)"),
    )
    .at(offset)
}

pub(crate) fn marker_count_mismatch_error(found: usize, supplied: usize) -> IseriesError {
    build_error(
        ErrorCode::MarkerCountMismatch,
        "Parameter count mismatch",
        &format!("statement contains {found} parameter markers but {supplied} parameters were supplied"),
    )
}

pub(crate) fn marker_outside_clause_error(offset: usize) -> IseriesError {
    build_error(
        ErrorCode::UnsupportedConstruct,
        "Marker outside a known clause",
        "parameter marker appears before any SELECT, WHERE or CASE keyword",
    )
    .at(offset)
}

pub(crate) fn union_branch_shape_error(branch: usize, offset: usize) -> IseriesError {
    build_error(
        ErrorCode::UnsupportedConstruct,
        "Set-operation branches differ",
        &format!(
            "branch {branch} has a different marker role pattern than branch 0; projection markers cannot be inlined consistently"
        ),
    )
    .at(offset)
}

pub fn backend_error(message: impl std::fmt::Display) -> IseriesError {
    build_error(ErrorCode::Backend, "Backend error", &message.to_string())
}

pub(crate) fn invalid_options_error(message: impl std::fmt::Display) -> IseriesError {
    build_error(
        ErrorCode::Config,
        "Invalid rewrite options",
        &message.to_string(),
    )
}
