pub mod school;
pub mod teacher;

pub use school::{Department, SchoolEdge, SchoolNode, SchoolSummary};
pub use teacher::{PageInfo, TeacherEdge, TeacherNode, TeacherSchoolRef};
