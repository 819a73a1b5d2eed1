pub mod assignment;
pub mod course;
pub mod dashboard;
pub mod learner;
pub mod schedule;
pub mod trainer;

pub use assignment::Assignment;
pub use course::{CourseId, CourseInput, CourseListing, CourseRecord, CourseView, Material, TrainerSummary};
pub use dashboard::DashboardSummary;
pub use learner::{Learner, LearnerId, RosterEntry};
pub use schedule::ScheduleEntry;
pub use trainer::{AssignPayload, AssignTrainerRequest, Trainer, TrainerId, TrainerView};
