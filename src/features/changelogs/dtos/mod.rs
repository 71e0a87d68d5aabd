mod changelog_dto;

pub use changelog_dto::{
    AppliedQueryDto, ChangelogListParams, ChangelogListQuery, ChangelogListResponseDto,
    ChangelogResponseDto,
};
