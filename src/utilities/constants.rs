pub const TCGPLAYER_SEARCH_URL: &str = "https://www.tcgplayer.com/search/one-piece-card-game/product?productLineName=one-piece-card-game&page={page}&view=grid&ProductTypeName=Cards";
pub const PAGE_PLACEHOLDER: &str = "{page}";

pub const WEBDRIVER_URL: &str = "http://localhost:4444";

pub const OUTPUT_DIR: &str = "output";
pub const OUTPUT_PREFIX: &str = "optcg_data_";

pub const FILE_DATE_FORMAT: &str = "%Y%m%d";
pub const COLUMN_DATE_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_WAIT_SECS: u64 = 12;
pub const DEFAULT_WAIT_INCREMENT_SECS: u64 = 1;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const BUCKET_ENV: &str = "S3_OPTCG_BUCKET_NAME";
