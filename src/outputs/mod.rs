//! Reply text for the chat commands.
//!
//! # Submodules
//!
//! - [`news`]: the `/news` digest grouped by source
//! - [`keywords`]: the `/keywords` ranking with its legend
//!
//! Fixed replies (welcome, help, acknowledgements, failures) live here.

pub mod keywords;
pub mod news;

pub const WELCOME_TEXT: &str = "👋 Xin chào! Tôi là bot tìm kiếm tin tức sức khỏe 🏥

Các lệnh có sẵn:
/news - Lấy tin tức mới nhất
/keywords - Xem các từ khóa hot
/help - Hiển thị trợ giúp";

pub const HELP_TEXT: &str = "🤖 Các lệnh có sẵn:

/news - Lấy tin tức mới nhất từ các báo uy tín
/keywords - Xem các từ khóa hot về sức khỏe
/help - Hiển thị trợ giúp này

📝 Chú ý:
- Tin tức được cập nhật mỗi 24 giờ
- Từ khóa được phân tích từ các tin tức mới nhất";

pub const NEWS_SEARCHING: &str = "🔍 Đang tìm kiếm tin tức sức khỏe mới...";
pub const KEYWORDS_SEARCHING: &str = "🔍 Đang phân tích từ khóa sức khỏe nổi bật...";
pub const NO_NEWS_FOUND: &str = "❌ Không tìm thấy tin tức nào. Vui lòng thử lại sau.";
pub const NO_KEYWORDS_FOUND: &str = "❌ Không tìm thấy từ khóa phù hợp. Vui lòng thử lại sau.";
pub const GENERIC_FAILURE: &str = "❌ Có lỗi xảy ra. Vui lòng thử lại sau.";
