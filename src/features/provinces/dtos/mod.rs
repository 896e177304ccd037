mod province_dto;

pub use province_dto::{
    CreateProvinceDto, ProvinceResponseDto, StoreSearchResponseDto, UpdateProvinceDto,
};
