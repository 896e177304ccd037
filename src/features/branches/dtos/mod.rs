mod branch_dto;

pub use branch_dto::{BranchResponseDto, CreateBranchDto, UpdateBranchDto};
