pub mod cv;

pub use cv::{
    Certification, CvData, Education, Experience, Labeled, Language, PersonalInfo, Project, Skill,
};
