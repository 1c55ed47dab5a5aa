//! Integration tests for the family / house / member containment rules.
//!
//! Exercises the repository layer against a real database:
//! - Assignment validates the house against the family
//! - House and family deletes keep their members
//! - Removal clears the whole placement
//! - Related families are symmetric
//! - Spouse and house-head rules

use assert_matches::assert_matches;
use parish_core::error::CoreError;
use parish_core::member::FamilyRole;
use sqlx::PgPool;
use parish_db::error::RepoError;
use parish_db::models::family::CreateFamily;
use parish_db::models::house::CreateHouse;
use parish_db::models::member::{AssignFamily, CreateMember};
use parish_db::repositories::{FamilyRepo, HouseRepo, MemberRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_family(name: &str) -> CreateFamily {
    CreateFamily {
        name: name.to_string(),
        address: None,
        phone: None,
        house_name: None,
    }
}

fn new_house(family_id: i64, name: &str) -> CreateHouse {
    CreateHouse {
        family_id,
        name: name.to_string(),
        address: None,
    }
}

fn new_member(first: &str, last: &str) -> CreateMember {
    CreateMember {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: None,
        phone: None,
        date_of_birth: None,
        gender: None,
        address: None,
        photo_url: None,
        status: None,
    }
}

fn assign(family_id: i64, house_id: Option<i64>) -> AssignFamily {
    AssignFamily {
        family_id,
        house_id,
        family_role: None,
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_member_to_house_in_family(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let north = HouseRepo::create(&pool, &new_house(smith.id, "North House")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();

    let placed = MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, Some(north.id)))
        .await
        .unwrap();

    assert_eq!(placed.family_id, Some(smith.id));
    assert_eq!(placed.house_id, Some(north.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_rejects_house_of_other_family(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let jones = FamilyRepo::create(&pool, &new_family("Jones")).await.unwrap();
    let jones_house = HouseRepo::create(&pool, &new_house(jones.id, "Jones Cottage"))
        .await
        .unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();

    let result =
        MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, Some(jones_house.id))).await;
    assert_matches!(result, Err(RepoError::Core(CoreError::Validation(_))));

    let unchanged = MemberRepo::find_by_id(&pool, john.id).await.unwrap().unwrap();
    assert_eq!(unchanged.family_id, None);
    assert_eq!(unchanged.house_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_unknown_family_is_not_found(pool: PgPool) {
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();

    let result = MemberRepo::assign_to_family(&pool, john.id, &assign(999_999, None)).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound { entity: "Family", .. }))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_without_house_clears_previous_house(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let north = HouseRepo::create(&pool, &new_house(smith.id, "North House")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();

    MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, Some(north.id)))
        .await
        .unwrap();
    HouseRepo::set_head(&pool, north.id, Some(john.id)).await.unwrap();

    let moved = MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, None))
        .await
        .unwrap();
    assert_eq!(moved.family_id, Some(smith.id));
    assert_eq!(moved.house_id, None);

    let house = HouseRepo::find_by_id(&pool, north.id).await.unwrap().unwrap();
    assert_eq!(house.head_member_id, None, "leaving the house drops the headship");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_changing_family_clears_spouse(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let jones = FamilyRepo::create(&pool, &new_family("Jones")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();
    let mary = MemberRepo::create(&pool, &new_member("Mary", "Smith")).await.unwrap();

    MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, None)).await.unwrap();
    MemberRepo::set_spouse(&pool, john.id, Some(mary.id)).await.unwrap();

    let same = MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, None))
        .await
        .unwrap();
    assert_eq!(same.spouse_id, Some(mary.id), "same family keeps the spouse");

    let moved = MemberRepo::assign_to_family(&pool, john.id, &assign(jones.id, None))
        .await
        .unwrap();
    assert_eq!(moved.spouse_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_with_head_role_sets_head_flag(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();

    let input = AssignFamily {
        family_id: smith.id,
        house_id: None,
        family_role: Some(FamilyRole::Head),
    };
    let head = MemberRepo::assign_to_family(&pool, john.id, &input).await.unwrap();

    assert_eq!(head.family_role.as_deref(), Some("HEAD"));
    assert!(head.head_of_family);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_family_may_have_several_heads(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();
    let mary = MemberRepo::create(&pool, &new_member("Mary", "Smith")).await.unwrap();

    for id in [john.id, mary.id] {
        MemberRepo::assign_to_family(&pool, id, &assign(smith.id, None)).await.unwrap();
        MemberRepo::change_family_role(&pool, id, FamilyRole::Head).await.unwrap();
    }

    let heads = MemberRepo::list_by_family(&pool, smith.id)
        .await
        .unwrap()
        .into_iter()
        .filter(|m| m.head_of_family)
        .count();
    assert_eq!(heads, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_database_rejects_house_outside_family(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let jones = FamilyRepo::create(&pool, &new_family("Jones")).await.unwrap();
    let jones_house = HouseRepo::create(&pool, &new_house(jones.id, "Jones Cottage"))
        .await
        .unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();

    let result = sqlx::query("UPDATE members SET family_id = $2, house_id = $3 WHERE id = $1")
        .bind(john.id)
        .bind(smith.id)
        .bind(jones_house.id)
        .execute(&pool)
        .await;

    let err = result.unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

// ---------------------------------------------------------------------------
// Removal and deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_remove_from_family_clears_placement(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let north = HouseRepo::create(&pool, &new_house(smith.id, "North House")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();

    let input = AssignFamily {
        family_id: smith.id,
        house_id: Some(north.id),
        family_role: Some(FamilyRole::Head),
    };
    MemberRepo::assign_to_family(&pool, john.id, &input).await.unwrap();

    let removed = MemberRepo::remove_from_family(&pool, john.id).await.unwrap();
    assert_eq!(removed.family_id, None);
    assert_eq!(removed.house_id, None);
    assert_eq!(removed.family_role, None);
    assert!(!removed.head_of_family);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_house_keeps_member_in_family(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let north = HouseRepo::create(&pool, &new_house(smith.id, "North House")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();
    MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, Some(north.id)))
        .await
        .unwrap();

    assert!(HouseRepo::delete(&pool, north.id).await.unwrap());

    let john = MemberRepo::find_by_id(&pool, john.id).await.unwrap().unwrap();
    assert_eq!(john.family_id, Some(smith.id));
    assert_eq!(john.house_id, None);
    assert!(HouseRepo::find_by_id(&pool, north.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_family_releases_members(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let north = HouseRepo::create(&pool, &new_house(smith.id, "North House")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();
    MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, Some(north.id)))
        .await
        .unwrap();

    assert!(FamilyRepo::delete(&pool, smith.id).await.unwrap());

    let john = MemberRepo::find_by_id(&pool, john.id).await.unwrap().unwrap();
    assert_eq!(john.family_id, None);
    assert_eq!(john.house_id, None);
    assert!(HouseRepo::find_by_id(&pool, north.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_missing_family_returns_false(pool: PgPool) {
    assert!(!FamilyRepo::delete(&pool, 424_242).await.unwrap());
}

// ---------------------------------------------------------------------------
// Related families
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_related_families_are_symmetric(pool: PgPool) {
    let a = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let b = FamilyRepo::create(&pool, &new_family("Jones")).await.unwrap();

    FamilyRepo::link_related(&pool, b.id, a.id).await.unwrap();

    let from_a = FamilyRepo::list_related(&pool, a.id).await.unwrap();
    let from_b = FamilyRepo::list_related(&pool, b.id).await.unwrap();
    assert_eq!(from_a.iter().map(|f| f.id).collect::<Vec<_>>(), vec![b.id]);
    assert_eq!(from_b.iter().map(|f| f.id).collect::<Vec<_>>(), vec![a.id]);

    let again = FamilyRepo::link_related(&pool, a.id, b.id).await;
    assert_matches!(again, Err(RepoError::Core(CoreError::Conflict(_))));

    FamilyRepo::unlink_related(&pool, a.id, b.id).await.unwrap();
    assert!(FamilyRepo::list_related(&pool, b.id).await.unwrap().is_empty());

    let missing = FamilyRepo::unlink_related(&pool, a.id, b.id).await;
    assert_matches!(missing, Err(RepoError::Core(CoreError::NotFound { .. })));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_family_cannot_relate_to_itself(pool: PgPool) {
    let a = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();

    let result = FamilyRepo::link_related(&pool, a.id, a.id).await;
    assert_matches!(result, Err(RepoError::Core(CoreError::Validation(_))));
}

// ---------------------------------------------------------------------------
// Spouse and house head
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_spouse_link_is_one_directional(pool: PgPool) {
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();
    let mary = MemberRepo::create(&pool, &new_member("Mary", "Smith")).await.unwrap();

    MemberRepo::set_spouse(&pool, john.id, Some(mary.id)).await.unwrap();

    let mary = MemberRepo::find_by_id(&pool, mary.id).await.unwrap().unwrap();
    assert_eq!(mary.spouse_id, None);

    let own = MemberRepo::set_spouse(&pool, john.id, Some(john.id)).await;
    assert_matches!(own, Err(RepoError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_house_head_must_live_in_house(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let north = HouseRepo::create(&pool, &new_house(smith.id, "North House")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();
    MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, None)).await.unwrap();

    let result = HouseRepo::set_head(&pool, north.id, Some(john.id)).await;
    assert_matches!(result, Err(RepoError::Core(CoreError::Validation(_))));

    MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, Some(north.id)))
        .await
        .unwrap();
    let house = HouseRepo::set_head(&pool, north.id, Some(john.id)).await.unwrap();
    assert_eq!(house.head_member_id, Some(john.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_family_tree_groups_members_by_house(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    let jones = FamilyRepo::create(&pool, &new_family("Jones")).await.unwrap();
    let north = HouseRepo::create(&pool, &new_house(smith.id, "North House")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();
    let mary = MemberRepo::create(&pool, &new_member("Mary", "Smith")).await.unwrap();
    MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, Some(north.id)))
        .await
        .unwrap();
    MemberRepo::assign_to_family(&pool, mary.id, &assign(smith.id, None)).await.unwrap();
    FamilyRepo::link_related(&pool, smith.id, jones.id).await.unwrap();

    let tree = FamilyRepo::tree(&pool, smith.id).await.unwrap().unwrap();

    assert_eq!(tree.houses.len(), 1);
    assert_eq!(tree.houses[0].house.id, north.id);
    assert_eq!(tree.houses[0].members.len(), 1);
    assert_eq!(tree.houses[0].members[0].id, john.id);
    assert_eq!(tree.unhoused_members.len(), 1);
    assert_eq!(tree.unhoused_members[0].id, mary.id);
    assert_eq!(tree.related_families.len(), 1);
    assert_eq!(tree.related_families[0].id, jones.id);

    assert!(FamilyRepo::tree(&pool, 777_777).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_family_list_counts(pool: PgPool) {
    let smith = FamilyRepo::create(&pool, &new_family("Smith")).await.unwrap();
    HouseRepo::create(&pool, &new_house(smith.id, "North House")).await.unwrap();
    let john = MemberRepo::create(&pool, &new_member("John", "Smith")).await.unwrap();
    MemberRepo::assign_to_family(&pool, john.id, &assign(smith.id, None)).await.unwrap();

    let families = FamilyRepo::list(&pool, None).await.unwrap();
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].member_count, 1);
    assert_eq!(families[0].house_count, 1);

    let none = FamilyRepo::list(&pool, Some("%jones%")).await.unwrap();
    assert!(none.is_empty());
}
