//! Integration tests for the member directory query: search, status filter,
//! sorting and pagination.

use parish_core::directory::{
    search_pattern, DirectoryQuery, SortColumn, SortOrder, StatusFilter,
};
use parish_core::member::MemberStatus;
use sqlx::PgPool;
use parish_db::models::family::CreateFamily;
use parish_db::models::member::{AssignFamily, CreateMember};
use parish_db::repositories::{FamilyRepo, MemberRepo};

fn member(first: &str, last: &str, email: Option<&str>, phone: Option<&str>) -> CreateMember {
    CreateMember {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.map(str::to_string),
        phone: phone.map(str::to_string),
        date_of_birth: None,
        gender: None,
        address: None,
        photo_url: None,
        status: Some(MemberStatus::Active),
    }
}

async fn seed(pool: &PgPool) {
    let people = [
        member("John", "Smith", Some("john@example.com"), None),
        member("Mary", "Johnson", None, Some("555-0100")),
        member("Peter", "Brown", Some("peter@example.com"), Some("555-0101")),
        member("Anna", "White", Some("anna.johnny@example.com"), None),
        member("Luke", "Green", None, None),
    ];
    for p in &people {
        MemberRepo::create(pool, p).await.unwrap();
    }
}

fn query(search: Option<&str>, page: i64, limit: i64) -> DirectoryQuery {
    DirectoryQuery {
        pattern: search_pattern(search),
        page,
        limit,
        ..DirectoryQuery::default()
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_matches_name_email_phone_case_insensitively(pool: PgPool) {
    seed(&pool).await;

    let (rows, total) = MemberRepo::search(&pool, &query(Some("JOHN"), 1, 10)).await.unwrap();

    let mut names: Vec<_> = rows.iter().map(|r| r.first_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Anna", "John", "Mary"]);
    assert_eq!(total, 3);

    for row in &rows {
        let haystack = format!(
            "{} {} {} {}",
            row.first_name,
            row.last_name,
            row.email.as_deref().unwrap_or(""),
            row.phone.as_deref().unwrap_or("")
        )
        .to_lowercase();
        assert!(haystack.contains("john"), "{haystack} should contain john");
    }

    let (by_phone, _) = MemberRepo::search(&pool, &query(Some("555-01"), 1, 10)).await.unwrap();
    assert_eq!(by_phone.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    seed(&pool).await;

    let (rows, total) = MemberRepo::search(&pool, &query(Some("%"), 1, 10)).await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pagination_total_is_independent_of_page_and_limit(pool: PgPool) {
    seed(&pool).await;

    let mut seen = Vec::new();
    for page in 1..=3 {
        let (rows, total) = MemberRepo::search(&pool, &query(None, page, 2)).await.unwrap();
        assert!(rows.len() <= 2);
        assert_eq!(total, 5);
        seen.extend(rows.into_iter().map(|r| r.id));
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 5, "pages must not overlap");

    let (rows, total) = MemberRepo::search(&pool, &query(None, 1, 100)).await.unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(total, 5);

    let (past_end, total) = MemberRepo::search(&pool, &query(None, 9, 2)).await.unwrap();
    assert!(past_end.is_empty());
    assert_eq!(total, 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_filter(pool: PgPool) {
    seed(&pool).await;
    let mut pending = member("Paul", "Black", None, None);
    pending.status = None;
    MemberRepo::create(&pool, &pending).await.unwrap();

    let params = DirectoryQuery {
        status: StatusFilter::Only(MemberStatus::PendingApproval),
        ..DirectoryQuery::default()
    };
    let (rows, total) = MemberRepo::search(&pool, &params).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].first_name, "Paul");
    assert_eq!(rows[0].status, "PENDING_APPROVAL");

    let all = DirectoryQuery::default();
    let (_, total) = MemberRepo::search(&pool, &all).await.unwrap();
    assert_eq!(total, 6);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sort_by_first_name_ascending(pool: PgPool) {
    seed(&pool).await;

    let params = DirectoryQuery {
        sort: SortColumn::FirstName,
        order: SortOrder::Asc,
        ..DirectoryQuery::default()
    };
    let (rows, _) = MemberRepo::search(&pool, &params).await.unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.first_name.as_str()).collect();
    assert_eq!(names, vec!["Anna", "John", "Luke", "Mary", "Peter"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rows_carry_family_name(pool: PgPool) {
    let smith = FamilyRepo::create(
        &pool,
        &CreateFamily {
            name: "Smith".to_string(),
            address: None,
            phone: None,
            house_name: None,
        },
    )
    .await
    .unwrap();
    let john = MemberRepo::create(&pool, &member("John", "Smith", None, None)).await.unwrap();
    MemberRepo::assign_to_family(
        &pool,
        john.id,
        &AssignFamily {
            family_id: smith.id,
            house_id: None,
            family_role: None,
        },
    )
    .await
    .unwrap();

    let params = DirectoryQuery {
        sort: SortColumn::FamilyName,
        ..DirectoryQuery::default()
    };
    let (rows, _) = MemberRepo::search(&pool, &params).await.unwrap();
    assert_eq!(rows[0].family_name.as_deref(), Some("Smith"));
    assert_eq!(rows[0].house_name, None);
}
