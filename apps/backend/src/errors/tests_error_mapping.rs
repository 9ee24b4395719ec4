// DomainError -> AppError mapping, without HTTP or database
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_kinds_to_400() {
    let cases = [
        (ValidationKind::SymbolLocked, ErrorCode::SymbolLocked),
        (ValidationKind::InvalidSymbol, ErrorCode::InvalidSymbol),
        (ValidationKind::DuplicateSymbol, ErrorCode::DuplicateSymbol),
        (ValidationKind::InvalidAddress, ErrorCode::InvalidAddress),
        (ValidationKind::InvalidBalance, ErrorCode::InvalidBalance),
        (
            ValidationKind::InvalidStatusTransition,
            ErrorCode::InvalidStatusTransition,
        ),
        (
            ValidationKind::Other("addressLocked".into()),
            ErrorCode::ValidationError,
        ),
    ];

    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "bad field").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 400);
    }
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::conflict(ConflictKind::DuplicateSymbol, "taken").into();
    assert_eq!(app.code().as_str(), "DUPLICATE_SYMBOL");
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError = DomainError::conflict(ConflictKind::Other("Unique".into()), "x").into();
    assert_eq!(app.code(), ErrorCode::Conflict);
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Game, "Game 3 not found").into();
    assert_eq!(app.code(), ErrorCode::GameNotFound);
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::Other("Row".into()), "gone").into();
    assert_eq!(app.code(), ErrorCode::NotFound);
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "slow").into();
    assert_eq!(app.code(), ErrorCode::DbTimeout);
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::Other("io".into()), "boom").into();
    assert_eq!(app.code(), ErrorCode::DbError);
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn forbidden_keeps_detail() {
    let app: AppError = DomainError::forbidden("Only admin/system can update in_jail").into();
    assert_eq!(app.code(), ErrorCode::InsufficientRole);
    assert_eq!(app.status().as_u16(), 403);
    assert!(app.to_string().contains("in_jail"));
}
