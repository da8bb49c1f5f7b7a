//! The authorization policy — a pure decision table.
//!
//! `can_perform` is total and side-effect-free. Denial for a missing
//! credential is distinguished from denial for an insufficient role so the
//! HTTP layer can map them to 401 and 403 respectively.
//!
//! Enrollment-dependent conditions (a certificate requires a *completed*
//! enrollment; a review requires a prior enrollment) need store state and are
//! enforced by the service after this role gate passes.

use crate::{course::Course, user::{Actor, Role}};

/// Everything an actor can attempt against a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Create,
  Read,
  Update,
  Delete,
  Enroll,
  Review,
  DownloadCertificate,
}

/// The outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  Allow,
  Deny(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
  /// No actor was resolved for the request.
  Unauthenticated,
  /// The actor's role or ownership is insufficient.
  Forbidden,
}

impl Decision {
  pub fn is_allowed(self) -> bool { matches!(self, Decision::Allow) }
}

/// Decide whether `actor` may perform `action` on `course`.
///
/// `course` is `None` for actions that do not target an existing course
/// (`Create`, list-style `Read`). Ownership checks treat a missing course as
/// deny: `Update`/`Delete` are meaningless without a target.
pub fn can_perform(
  actor:  Option<&Actor>,
  course: Option<&Course>,
  action: Action,
) -> Decision {
  // Anonymous reads are the single unauthenticated allowance.
  let Some(actor) = actor else {
    return match action {
      Action::Read => Decision::Allow,
      _ => Decision::Deny(DenyReason::Unauthenticated),
    };
  };

  match action {
    Action::Read => Decision::Allow,

    Action::Create => match actor.role {
      Role::Instructor | Role::Admin => Decision::Allow,
      Role::Student => Decision::Deny(DenyReason::Forbidden),
    },

    Action::Update | Action::Delete => match (actor.role, course) {
      (Role::Admin, _) => Decision::Allow,
      (Role::Instructor, Some(c)) if c.instructor == actor.id => {
        Decision::Allow
      }
      (Role::Instructor, _) | (Role::Student, _) => {
        Decision::Deny(DenyReason::Forbidden)
      }
    },

    // Role-wise open to every authenticated user; enrollment prerequisites
    // are checked by the service.
    Action::Enroll | Action::Review | Action::DownloadCertificate => {
      Decision::Allow
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::course::CourseStatus;

  fn course_owned_by(instructor: Uuid) -> Course {
    Course {
      course_id:   Uuid::new_v4(),
      title:       "Test Course".into(),
      description: "desc".into(),
      category:    None,
      level:       None,
      price:       0.0,
      duration:    None,
      thumbnail:   None,
      status:      CourseStatus::Published,
      instructor,
      created_at:  Utc::now(),
    }
  }

  fn actor(role: Role) -> Actor { Actor::new(Uuid::new_v4(), role) }

  #[test]
  fn anonymous_may_only_read() {
    assert!(can_perform(None, None, Action::Read).is_allowed());

    for action in [
      Action::Create,
      Action::Update,
      Action::Delete,
      Action::Enroll,
      Action::Review,
      Action::DownloadCertificate,
    ] {
      assert_eq!(
        can_perform(None, None, action),
        Decision::Deny(DenyReason::Unauthenticated),
        "{action:?} should require authentication"
      );
    }
  }

  #[test]
  fn students_cannot_create() {
    assert_eq!(
      can_perform(Some(&actor(Role::Student)), None, Action::Create),
      Decision::Deny(DenyReason::Forbidden)
    );
  }

  #[test]
  fn instructors_and_admins_create() {
    assert!(
      can_perform(Some(&actor(Role::Instructor)), None, Action::Create)
        .is_allowed()
    );
    assert!(
      can_perform(Some(&actor(Role::Admin)), None, Action::Create)
        .is_allowed()
    );
  }

  #[test]
  fn owner_updates_foreign_instructor_does_not() {
    let owner = actor(Role::Instructor);
    let other = actor(Role::Instructor);
    let course = course_owned_by(owner.id);

    assert!(
      can_perform(Some(&owner), Some(&course), Action::Update).is_allowed()
    );
    assert_eq!(
      can_perform(Some(&other), Some(&course), Action::Update),
      Decision::Deny(DenyReason::Forbidden)
    );
    assert_eq!(
      can_perform(Some(&other), Some(&course), Action::Delete),
      Decision::Deny(DenyReason::Forbidden)
    );
  }

  #[test]
  fn admin_updates_any_course() {
    let course = course_owned_by(Uuid::new_v4());
    assert!(
      can_perform(Some(&actor(Role::Admin)), Some(&course), Action::Update)
        .is_allowed()
    );
    assert!(
      can_perform(Some(&actor(Role::Admin)), Some(&course), Action::Delete)
        .is_allowed()
    );
  }

  #[test]
  fn any_authenticated_actor_may_enroll() {
    let course = course_owned_by(Uuid::new_v4());
    for role in [Role::Student, Role::Instructor, Role::Admin] {
      assert!(
        can_perform(Some(&actor(role)), Some(&course), Action::Enroll)
          .is_allowed()
      );
    }
  }
}
