use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, FormData, InputEvent};
use yew::prelude::*;

const API_BASE_URL: &str = "/api";

const DEFAULT_CURRENCY: &str = "USD";

const CURRENCY_CODES: [&str; 11] = [
    "UGX", "MYR", "USD", "EUR", "GBP", "AUD", "SGD", "JPY", "CNY", "THB", "IDR",
];

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
struct Category {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub icon: String,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
struct Receipt {
    pub id: i32,
    pub filename: String,
    pub original_filename: String,
    #[serde(default)]
    pub upload_date: Option<String>,
    pub expense_id: i32,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
struct Expense {
    pub id: i32,
    pub title: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: i32,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_color: Option<String>,
    #[serde(default)]
    pub category_icon: Option<String>,
    #[serde(default)]
    pub receipts: Vec<Receipt>,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
struct Budget {
    pub id: i32,
    pub name: String,
    pub amount: f64,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub category_id: Option<i32>,
    pub is_active: bool,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_color: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
struct BudgetKpi {
    pub budget_id: i32,
    pub budget_name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    pub budget_amount: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub percentage_used: f64,
    pub is_exceeded: bool,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
struct MonthlyTotal {
    pub month: u32,
    pub month_name: String,
    pub total: f64,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
struct CategoryTotal {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub total: f64,
}

#[derive(Clone, PartialEq, Default, Deserialize, Serialize)]
struct SummaryReport {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub recent_expenses: Vec<Expense>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SortBy {
    Date,
    Amount,
    Title,
}

impl SortBy {
    fn as_str(self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Amount => "amount",
            SortBy::Title => "title",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

const SORT_OPTIONS: [(&str, &str); 6] = [
    ("date-desc", "Date (Newest First)"),
    ("date-asc", "Date (Oldest First)"),
    ("amount-desc", "Amount (Highest First)"),
    ("amount-asc", "Amount (Lowest First)"),
    ("title-asc", "Title (A-Z)"),
    ("title-desc", "Title (Z-A)"),
];

fn parse_sort_option(value: &str) -> (SortBy, SortOrder) {
    let (field, order) = value.split_once('-').unwrap_or(("date", "desc"));
    let sort_by = match field {
        "amount" => SortBy::Amount,
        "title" => SortBy::Title,
        _ => SortBy::Date,
    };
    let sort_order = match order {
        "asc" => SortOrder::Asc,
        _ => SortOrder::Desc,
    };
    (sort_by, sort_order)
}

fn sort_option_value(sort_by: SortBy, sort_order: SortOrder) -> String {
    format!("{}-{}", sort_by.as_str(), sort_order.as_str())
}

#[derive(Clone, PartialEq)]
struct ExpenseFilters {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category_id: Option<i32>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for ExpenseFilters {
    fn default() -> Self {
        ExpenseFilters {
            start_date: None,
            end_date: None,
            category_id: None,
            sort_by: SortBy::Date,
            sort_order: SortOrder::Desc,
        }
    }
}

impl ExpenseFilters {
    fn query_string(&self) -> String {
        query_from_pairs(&[
            ("start_date", self.start_date.clone()),
            ("end_date", self.end_date.clone()),
            ("category_id", self.category_id.map(|id| id.to_string())),
            ("sort_by", Some(self.sort_by.as_str().to_string())),
            ("sort_order", Some(self.sort_order.as_str().to_string())),
        ])
    }
}

// null parameters are omitted entirely rather than sent as empty values
fn query_from_pairs(pairs: &[(&str, Option<String>)]) -> String {
    pairs
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{}={}", key, v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn report_query(start_date: &Option<String>, end_date: &Option<String>, year: Option<i32>) -> String {
    query_from_pairs(&[
        ("start_date", start_date.clone()),
        ("end_date", end_date.clone()),
        ("year", year.map(|y| y.to_string())),
    ])
}

#[derive(Clone, PartialEq, Serialize)]
struct ExpensePayload {
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub date: String,
    pub category_id: i32,
    pub description: String,
}

#[derive(Clone, PartialEq, Serialize)]
struct BudgetPayload {
    pub name: String,
    pub amount: f64,
    pub start_date: String,
    pub end_date: String,
    pub category_id: Option<i32>,
    pub is_active: bool,
}

#[derive(Clone, PartialEq, Serialize)]
struct CategoryPayload {
    pub name: String,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Error)]
enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Server(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

type ApiResult<T> = Result<T, ApiError>;

fn decode_error(err: gloo_net::Error) -> ApiError {
    ApiError::Decode(err.to_string())
}

fn form_data_error() -> ApiError {
    ApiError::Network("could not assemble form data".to_string())
}

// non-2xx bodies carry {"error": "..."}; fall back to a generic message
async fn error_from_response(response: Response, fallback: &str) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match response.json::<ErrorBody>().await {
        Ok(body) => ApiError::Server(body.error),
        Err(_) => ApiError::Server(fallback.to_string()),
    }
}

fn expense_form_entries(payload: &ExpensePayload) -> Vec<(&'static str, String)> {
    vec![
        ("title", payload.title.clone()),
        ("amount", payload.amount.to_string()),
        ("currency", payload.currency.clone()),
        ("date", payload.date.clone()),
        ("category_id", payload.category_id.to_string()),
        ("description", payload.description.clone()),
    ]
}

fn expense_form_data(payload: &ExpensePayload, files: &[File]) -> ApiResult<FormData> {
    let form = FormData::new().map_err(|_| form_data_error())?;
    for (key, value) in expense_form_entries(payload) {
        form.append_with_str(key, &value)
            .map_err(|_| form_data_error())?;
    }
    for file in files {
        form.append_with_blob_and_filename("receipts", file, &file.name())
            .map_err(|_| form_data_error())?;
    }
    Ok(form)
}

fn receipts_form_data(files: &[File]) -> ApiResult<FormData> {
    let form = FormData::new().map_err(|_| form_data_error())?;
    for file in files {
        form.append_with_blob_and_filename("receipts", file, &file.name())
            .map_err(|_| form_data_error())?;
    }
    Ok(form)
}

async fn fetch_expenses(filters: &ExpenseFilters) -> ApiResult<Vec<Expense>> {
    let url = format!("{}/expenses?{}", API_BASE_URL, filters.query_string());
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch expenses").await);
    }
    response.json::<Vec<Expense>>().await.map_err(decode_error)
}

async fn fetch_expense(expense_id: i32) -> ApiResult<Expense> {
    let url = format!("{}/expenses/{}", API_BASE_URL, expense_id);
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch expense details").await);
    }
    response.json::<Expense>().await.map_err(decode_error)
}

async fn create_expense(payload: &ExpensePayload, files: &[File]) -> ApiResult<Expense> {
    let form = expense_form_data(payload, files)?;
    let url = format!("{}/expenses", API_BASE_URL);
    let response = Request::post(&url)
        .body(form)
        .map_err(ApiError::from)?
        .send()
        .await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to create expense").await);
    }
    response.json::<Expense>().await.map_err(decode_error)
}

async fn update_expense(
    expense_id: i32,
    payload: &ExpensePayload,
    files: &[File],
) -> ApiResult<Expense> {
    let form = expense_form_data(payload, files)?;
    let url = format!("{}/expenses/{}", API_BASE_URL, expense_id);
    let response = Request::put(&url)
        .body(form)
        .map_err(ApiError::from)?
        .send()
        .await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to update expense").await);
    }
    response.json::<Expense>().await.map_err(decode_error)
}

async fn upload_receipts(expense_id: i32, files: &[File]) -> ApiResult<Expense> {
    let form = receipts_form_data(files)?;
    let url = format!("{}/expenses/{}", API_BASE_URL, expense_id);
    let response = Request::put(&url)
        .body(form)
        .map_err(ApiError::from)?
        .send()
        .await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to upload receipts").await);
    }
    response.json::<Expense>().await.map_err(decode_error)
}

async fn delete_expense(expense_id: i32) -> ApiResult<()> {
    let url = format!("{}/expenses/{}", API_BASE_URL, expense_id);
    let response = Request::delete(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to delete expense").await);
    }
    Ok(())
}

async fn delete_receipt(receipt_id: i32) -> ApiResult<()> {
    let url = format!("{}/receipts/{}", API_BASE_URL, receipt_id);
    let response = Request::delete(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to delete receipt").await);
    }
    Ok(())
}

async fn fetch_categories() -> ApiResult<Vec<Category>> {
    let url = format!("{}/categories", API_BASE_URL);
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch categories").await);
    }
    response.json::<Vec<Category>>().await.map_err(decode_error)
}

#[allow(dead_code)] // no view creates categories yet; the endpoint is part of the API surface
async fn create_category(payload: &CategoryPayload) -> ApiResult<Category> {
    let url = format!("{}/categories", API_BASE_URL);
    let response = Request::post(&url)
        .json(payload)
        .map_err(ApiError::from)?
        .send()
        .await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to create category").await);
    }
    response.json::<Category>().await.map_err(decode_error)
}

async fn fetch_budgets() -> ApiResult<Vec<Budget>> {
    let url = format!("{}/budgets", API_BASE_URL);
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch budgets").await);
    }
    response.json::<Vec<Budget>>().await.map_err(decode_error)
}

async fn fetch_budget(budget_id: i32) -> ApiResult<Budget> {
    let url = format!("{}/budgets/{}", API_BASE_URL, budget_id);
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch budget details").await);
    }
    response.json::<Budget>().await.map_err(decode_error)
}

async fn create_budget(payload: &BudgetPayload) -> ApiResult<Budget> {
    let url = format!("{}/budgets", API_BASE_URL);
    let response = Request::post(&url)
        .json(payload)
        .map_err(ApiError::from)?
        .send()
        .await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to create budget").await);
    }
    response.json::<Budget>().await.map_err(decode_error)
}

async fn update_budget(budget_id: i32, payload: &BudgetPayload) -> ApiResult<Budget> {
    let url = format!("{}/budgets/{}", API_BASE_URL, budget_id);
    let response = Request::put(&url)
        .json(payload)
        .map_err(ApiError::from)?
        .send()
        .await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to update budget").await);
    }
    response.json::<Budget>().await.map_err(decode_error)
}

async fn delete_budget(budget_id: i32) -> ApiResult<()> {
    let url = format!("{}/budgets/{}", API_BASE_URL, budget_id);
    let response = Request::delete(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to delete budget").await);
    }
    Ok(())
}

async fn fetch_budget_kpis() -> ApiResult<Vec<BudgetKpi>> {
    let url = format!("{}/budgets/kpi", API_BASE_URL);
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch budget KPI data").await);
    }
    response.json::<Vec<BudgetKpi>>().await.map_err(decode_error)
}

async fn fetch_budget_kpi(budget_id: i32) -> ApiResult<BudgetKpi> {
    let url = format!("{}/budgets/{}/kpi", API_BASE_URL, budget_id);
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch budget KPI data").await);
    }
    response.json::<BudgetKpi>().await.map_err(decode_error)
}

async fn fetch_monthly_report(
    start_date: &Option<String>,
    end_date: &Option<String>,
    year: Option<i32>,
) -> ApiResult<Vec<MonthlyTotal>> {
    let url = format!(
        "{}/reports/monthly?{}",
        API_BASE_URL,
        report_query(start_date, end_date, year)
    );
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch monthly report").await);
    }
    response
        .json::<Vec<MonthlyTotal>>()
        .await
        .map_err(decode_error)
}

async fn fetch_category_report(
    start_date: &Option<String>,
    end_date: &Option<String>,
) -> ApiResult<Vec<CategoryTotal>> {
    let url = format!(
        "{}/reports/category?{}",
        API_BASE_URL,
        report_query(start_date, end_date, None)
    );
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch category report").await);
    }
    response
        .json::<Vec<CategoryTotal>>()
        .await
        .map_err(decode_error)
}

async fn fetch_summary_report(
    start_date: &Option<String>,
    end_date: &Option<String>,
) -> ApiResult<SummaryReport> {
    let url = format!(
        "{}/reports/summary?{}",
        API_BASE_URL,
        report_query(start_date, end_date, None)
    );
    let response = Request::get(&url).send().await?;
    if !response.ok() {
        return Err(error_from_response(response, "Failed to fetch summary report").await);
    }
    response.json::<SummaryReport>().await.map_err(decode_error)
}

fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, frac)
}

fn format_money(value: f64, code: &str) -> String {
    format!("{} {}", code, format_amount(value))
}

fn format_ymd(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            if leap {
                29
            } else {
                28
            }
        }
    }
}

fn current_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

fn today_ymd() -> String {
    let now = js_sys::Date::new_0();
    format_ymd(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
}

fn first_day_of_month() -> String {
    let now = js_sys::Date::new_0();
    format_ymd(now.get_full_year() as i32, now.get_month() + 1, 1)
}

fn last_day_of_month() -> String {
    let now = js_sys::Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1;
    format_ymd(year, month, days_in_month(year, month))
}

fn short_month(name: &str) -> String {
    name.chars().take(3).collect()
}

// heights as a percentage of the tallest bar
fn bar_heights(totals: &[f64]) -> Vec<f64> {
    let max = totals.iter().cloned().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; totals.len()];
    }
    totals.iter().map(|t| (t / max * 100.0).max(0.0)).collect()
}

fn share_of_total(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

// the bar never overflows its track, the label keeps the real percentage
fn progress_width(percentage: f64) -> f64 {
    percentage.clamp(0.0, 100.0)
}

fn progress_tone(percentage: f64) -> &'static str {
    if percentage > 90.0 {
        "bg-red-600"
    } else if percentage > 75.0 {
        "bg-amber-500"
    } else {
        "bg-emerald-600"
    }
}

#[derive(Clone, PartialEq)]
enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, PartialEq)]
struct Toast {
    kind: ToastKind,
    message: String,
}

impl Toast {
    fn success(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

fn log_error(context: &str, err: &ApiError) {
    web_sys::console::error_1(&JsValue::from_str(&format!("{}: {}", context, err)));
}

fn report_failure(notify: &Callback<Toast>, context: &str, err: &ApiError) {
    log_error(context, err);
    notify.emit(Toast::error(format!("{}. Please try again.", context)));
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[derive(Clone, PartialEq)]
enum Page {
    Dashboard,
    Expenses,
    ExpenseForm(Option<Expense>),
    Reports,
    Budgets,
    BudgetForm(Option<Budget>),
}

// form pages stay highlighted under their sidebar entry
fn nav_matches(target: &Page, current: &Page) -> bool {
    match (target, current) {
        (Page::Dashboard, Page::Dashboard) => true,
        (Page::Expenses, Page::Expenses) => true,
        (Page::ExpenseForm(None), Page::ExpenseForm(_)) => true,
        (Page::Reports, Page::Reports) => true,
        (Page::Budgets, Page::Budgets) | (Page::Budgets, Page::BudgetForm(_)) => true,
        _ => false,
    }
}

struct NavItem {
    label: &'static str,
    target: Page,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-slate-100">
            <div class="hidden md:flex">
                <Sidebar active_page={props.active_page.clone()} on_select={props.on_select.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[function_component(Header)]
fn header() -> Html {
    html! {
        <header class="bg-white border-b border-slate-200 h-14 flex items-center justify-between px-6">
            <span class="text-sm text-slate-500">{"Personal expense tracking"}</span>
            <span class="text-xs text-slate-400 font-semibold tracking-wide">{ today_ymd() }</span>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Dashboard",
            target: Page::Dashboard,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Expenses",
            target: Page::Expenses,
            icon: icon_list,
        },
        NavItem {
            label: "Add Expense",
            target: Page::ExpenseForm(None),
            icon: icon_plus_circle,
        },
        NavItem {
            label: "Reports",
            target: Page::Reports,
            icon: icon_bar_chart,
        },
        NavItem {
            label: "Budgets",
            target: Page::Budgets,
            icon: icon_target,
        },
    ];

    html! {
        <div class="w-[220px] h-screen bg-[#e4ece4] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <div class="w-11 h-11 bg-[#2e4832] rounded-full flex items-center justify-center text-white">
                    { icon_leaf() }
                </div>
                <span class="text-[#2e4832] text-2xl font-black tracking-tight">{"LeafLedger"}</span>
            </div>

            <div class="flex-1 bg-[#2e4832] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let is_active = nav_matches(&item.target, &props.active_page);
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#c6d8c6] text-[#2e4832] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-green-100/70 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let target = item.target.clone();

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(target.clone()))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>
            </div>
        </div>
    }
}

fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-slate-200">
                <h1 class="text-2xl font-bold text-slate-800">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

fn category_badge(name: &Option<String>, color: &Option<String>) -> Html {
    let label = name.clone().unwrap_or_else(|| "Uncategorized".to_string());
    let color = color.clone().unwrap_or_else(|| "#6c757d".to_string());
    html! {
        <span class="px-2.5 py-1 rounded-full text-[10px] font-bold text-white"
            style={format!("background-color: {}", color)}>
            { label }
        </span>
    }
}

fn monthly_bar_chart(rows: &[MonthlyTotal]) -> Html {
    if rows.is_empty() {
        return html! { <p class="text-sm text-slate-500">{"No expense data for this period."}</p> };
    }

    let totals: Vec<f64> = rows.iter().map(|row| row.total).collect();
    let heights = bar_heights(&totals);
    let slot = 480.0 / rows.len() as f64;

    html! {
        <svg viewBox="0 0 480 220" class="w-full h-64">
            <line x1="0" y1="190" x2="480" y2="190" stroke="#cbd5e1" stroke-width="1" />
            { for rows.iter().zip(heights.iter()).enumerate().map(|(i, (row, height))| {
                let bar_height = height / 100.0 * 170.0;
                let x = i as f64 * slot + slot * 0.2;
                let label_x = i as f64 * slot + slot * 0.5;
                html! {
                    <>
                        <rect
                            x={format!("{:.1}", x)}
                            y={format!("{:.1}", 188.0 - bar_height)}
                            width={format!("{:.1}", slot * 0.6)}
                            height={format!("{:.1}", bar_height.max(2.0))}
                            rx="2"
                            fill="#2e7d32">
                            <title>{ format!("{}: {}", row.month_name, format_money(row.total, DEFAULT_CURRENCY)) }</title>
                        </rect>
                        <text
                            x={format!("{:.1}", label_x)}
                            y="206"
                            font-size="11"
                            fill="#64748b"
                            text-anchor="middle">
                            { short_month(&row.month_name) }
                        </text>
                    </>
                }
            }) }
        </svg>
    }
}

fn category_distribution(rows: &[CategoryTotal]) -> Html {
    if rows.is_empty() {
        return html! { <p class="text-sm text-slate-500">{"No expense data for this period."}</p> };
    }

    let total: f64 = rows.iter().map(|row| row.total).sum();

    html! {
        <div class="space-y-3">
            { for rows.iter().map(|row| {
                let share = share_of_total(row.total, total);
                html! {
                    <div class="flex flex-col gap-1 text-sm">
                        <div class="flex items-center justify-between">
                            <span class="text-slate-700">{ &row.name }</span>
                            <span class="text-slate-500">{ format!("{:.1}%", share) }</span>
                        </div>
                        <div class="h-2 w-full bg-slate-200 rounded-full overflow-hidden">
                            <div class="h-full rounded-full"
                                style={format!("width: {:.1}%; background-color: {}", share, row.color)}>
                            </div>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

#[function_component(DashboardPage)]
fn dashboard_page() -> Html {
    let notify = use_context::<Callback<Toast>>().unwrap_or_else(Callback::noop);
    let summary = use_state(SummaryReport::default);
    let category_rows = use_state(Vec::<CategoryTotal>::new);
    let monthly_rows = use_state(Vec::<MonthlyTotal>::new);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);

    {
        let summary = summary.clone();
        let category_rows = category_rows.clone();
        let monthly_rows = monthly_rows.clone();
        let loading = loading.clone();
        let notify = notify.clone();

        use_effect_with_deps(
            move |_| {
                loading.set(true);
                spawn_local(async move {
                    let result: ApiResult<()> = async {
                        summary.set(fetch_summary_report(&None, &None).await?);
                        category_rows.set(fetch_category_report(&None, &None).await?);
                        monthly_rows
                            .set(fetch_monthly_report(&None, &None, Some(current_year())).await?);
                        Ok(())
                    }
                    .await;

                    if let Err(err) = result {
                        report_failure(&notify, "Failed to load dashboard data", &err);
                    }
                    loading.set(false);
                });
                || ()
            },
            *reload,
        );
    }

    let on_refresh = {
        let reload = reload.clone();
        Callback::from(move |_| reload.set(*reload + 1))
    };

    html! {
        { page_shell(
            "Dashboard",
            html! {
                <button onclick={on_refresh} class="flex items-center gap-2 bg-[#2e4832] text-white px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_refresh() }
                    {"Refresh"}
                </button>
            },
            html! {
                <>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                            <p class="text-sm text-slate-500 mb-2">{"Total Expenses"}</p>
                            <h3 class="text-3xl font-bold text-slate-800">{ format_money(summary.total, DEFAULT_CURRENCY) }</h3>
                            <p class="text-xs text-slate-400 mt-2">{"All time"}</p>
                        </div>
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                            <p class="text-sm text-slate-500 mb-2">{"Average Expense"}</p>
                            <h3 class="text-3xl font-bold text-slate-800">{ format_money(summary.average, DEFAULT_CURRENCY) }</h3>
                            <p class="text-xs text-slate-400 mt-2">{"Per transaction"}</p>
                        </div>
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                            <p class="text-sm text-slate-500 mb-2">{"Transaction Count"}</p>
                            <h3 class="text-3xl font-bold text-slate-800">{ summary.count }</h3>
                            <p class="text-xs text-slate-400 mt-2">{"Total records"}</p>
                        </div>
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                        <div class="lg:col-span-2 bg-white rounded-[10px] p-6 border border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg mb-4">{"Monthly Expenses"}</h3>
                            { if *loading {
                                html! { <p class="text-sm text-slate-500">{"Loading..."}</p> }
                            } else {
                                monthly_bar_chart(&monthly_rows)
                            }}
                        </div>
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg mb-4">{"Expense Categories"}</h3>
                            { if *loading {
                                html! { <p class="text-sm text-slate-500">{"Loading..."}</p> }
                            } else {
                                category_distribution(&category_rows)
                            }}
                        </div>
                    </div>

                    <div class="bg-white rounded-[10px] border border-slate-200 overflow-hidden">
                        <div class="p-6 border-b border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg">{"Recent Expenses"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Title"}</th>
                                        <th class="px-8 py-4 font-bold">{"Category"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-slate-100">
                                    { if summary.recent_expenses.is_empty() {
                                        html! { <tr><td colspan="4" class="px-8 py-6 text-center text-slate-500">{"No recent expenses"}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for summary.recent_expenses.iter().map(|expense| html! {
                                                    <tr key={expense.id} class="text-sm hover:bg-slate-50 transition-colors">
                                                        <td class="px-8 py-4 text-slate-500">{ &expense.date }</td>
                                                        <td class="px-8 py-4 text-slate-800">{ &expense.title }</td>
                                                        <td class="px-8 py-4">{ category_badge(&expense.category_name, &expense.category_color) }</td>
                                                        <td class="px-8 py-4 text-right font-semibold text-slate-800">{ format_money(expense.amount, &expense.currency) }</td>
                                                    </tr>
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
struct ExpensesPageProps {
    categories: Vec<Category>,
    on_navigate: Callback<Page>,
}

#[function_component(ExpensesPage)]
fn expenses_page(props: &ExpensesPageProps) -> Html {
    let notify = use_context::<Callback<Toast>>().unwrap_or_else(Callback::noop);
    let expenses = use_state(Vec::<Expense>::new);
    let loading = use_state(|| true);
    let applied = use_state(ExpenseFilters::default);
    let reload = use_state(|| 0u32);

    let draft_start = use_state(String::new);
    let draft_end = use_state(String::new);
    let draft_category = use_state(String::new);
    let draft_sort = use_state(|| "date-desc".to_string());

    {
        let expenses = expenses.clone();
        let loading = loading.clone();
        let notify = notify.clone();

        use_effect_with_deps(
            move |deps: &(ExpenseFilters, u32)| {
                let filters = deps.0.clone();
                loading.set(true);
                spawn_local(async move {
                    match fetch_expenses(&filters).await {
                        Ok(list) => expenses.set(list),
                        Err(err) => report_failure(&notify, "Failed to load expenses", &err),
                    }
                    loading.set(false);
                });
                || ()
            },
            ((*applied).clone(), *reload),
        );
    }

    let on_apply = {
        let applied = applied.clone();
        let draft_start = draft_start.clone();
        let draft_end = draft_end.clone();
        let draft_category = draft_category.clone();
        let draft_sort = draft_sort.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (sort_by, sort_order) = parse_sort_option(&draft_sort);
            applied.set(ExpenseFilters {
                start_date: Some((*draft_start).clone()).filter(|v| !v.is_empty()),
                end_date: Some((*draft_end).clone()).filter(|v| !v.is_empty()),
                category_id: draft_category.parse::<i32>().ok(),
                sort_by,
                sort_order,
            });
        })
    };

    let on_reset = {
        let applied = applied.clone();
        let draft_start = draft_start.clone();
        let draft_end = draft_end.clone();
        let draft_category = draft_category.clone();
        let draft_sort = draft_sort.clone();
        Callback::from(move |_| {
            draft_start.set(String::new());
            draft_end.set(String::new());
            draft_category.set(String::new());
            draft_sort.set("date-desc".to_string());
            applied.set(ExpenseFilters::default());
        })
    };

    let on_add = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::ExpenseForm(None)))
    };

    let on_edit = {
        let on_navigate = props.on_navigate.clone();
        let notify = notify.clone();
        Callback::from(move |expense_id: i32| {
            let on_navigate = on_navigate.clone();
            let notify = notify.clone();
            spawn_local(async move {
                match fetch_expense(expense_id).await {
                    Ok(expense) => on_navigate.emit(Page::ExpenseForm(Some(expense))),
                    Err(err) => report_failure(&notify, "Failed to load expense details", &err),
                }
            });
        })
    };

    let on_delete = {
        let notify = notify.clone();
        let reload = reload.clone();
        Callback::from(move |expense_id: i32| {
            if !confirm("Are you sure you want to delete this expense?") {
                return;
            }
            let notify = notify.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match delete_expense(expense_id).await {
                    Ok(()) => {
                        notify.emit(Toast::success("Expense deleted successfully"));
                        reload.set(*reload + 1);
                    }
                    Err(err) => {
                        log_error("Error deleting expense", &err);
                        notify.emit(Toast::error(err.to_string()));
                    }
                }
            });
        })
    };

    html! {
        { page_shell(
            "Expenses",
            html! {
                <button onclick={on_add} class="flex items-center gap-2 bg-[#2e4832] text-white px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"Add Expense"}
                </button>
            },
            html! {
                <>
                    <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                        <h3 class="font-bold text-slate-800 text-lg mb-4">{"Filters"}</h3>
                        <form onsubmit={on_apply} class="grid grid-cols-1 md:grid-cols-4 gap-3">
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-slate-500">{"Start Date"}</label>
                                <input type="date" value={(*draft_start).clone()} oninput={{
                                    let draft_start = draft_start.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        draft_start.set(input.value());
                                    })
                                }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-slate-500">{"End Date"}</label>
                                <input type="date" value={(*draft_end).clone()} oninput={{
                                    let draft_end = draft_end.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        draft_end.set(input.value());
                                    })
                                }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-slate-500">{"Category"}</label>
                                <select value={(*draft_category).clone()} onchange={{
                                    let draft_category = draft_category.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        draft_category.set(input.value());
                                    })
                                }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none">
                                    <option value="">{"All Categories"}</option>
                                    { for props.categories.iter().map(|category| html! {
                                        <option value={category.id.to_string()}>{ &category.name }</option>
                                    }) }
                                </select>
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-slate-500">{"Sort By"}</label>
                                <select value={(*draft_sort).clone()} onchange={{
                                    let draft_sort = draft_sort.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        draft_sort.set(input.value());
                                    })
                                }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none">
                                    { for SORT_OPTIONS.iter().map(|(value, label)| html! {
                                        <option value={*value}>{ *label }</option>
                                    }) }
                                </select>
                            </div>
                            <div class="md:col-span-4 flex gap-3">
                                <button type="submit" class="bg-[#2e4832] text-white px-4 py-2 rounded-[10px] text-sm font-bold">{"Apply Filters"}</button>
                                <button type="button" onclick={on_reset} class="bg-slate-200 text-slate-700 px-4 py-2 rounded-[10px] text-sm font-bold">{"Reset"}</button>
                            </div>
                        </form>
                    </div>

                    <div class="bg-white rounded-[10px] border border-slate-200 overflow-hidden">
                        <div class="p-6 border-b border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg">{"Expense List"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold">{"Date"}</th>
                                        <th class="px-6 py-4 font-bold">{"Title"}</th>
                                        <th class="px-6 py-4 font-bold">{"Category"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                                        <th class="px-6 py-4 font-bold">{"Receipts"}</th>
                                        <th class="px-6 py-4 font-bold">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-slate-100">
                                    { if *loading {
                                        html! { <tr><td colspan="6" class="px-6 py-6 text-center text-slate-500">{"Loading..."}</td></tr> }
                                    } else if expenses.is_empty() {
                                        html! { <tr><td colspan="6" class="px-6 py-6 text-center text-slate-500">{"No expenses found"}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for expenses.iter().map(|expense| {
                                                    let receipt_count = expense.receipts.len();
                                                    let on_edit = on_edit.clone();
                                                    let on_delete = on_delete.clone();
                                                    let expense_id = expense.id;
                                                    html! {
                                                        <tr key={expense.id} class="text-sm hover:bg-slate-50 transition-colors">
                                                            <td class="px-6 py-4 text-slate-500">{ &expense.date }</td>
                                                            <td class="px-6 py-4 text-slate-800">{ &expense.title }</td>
                                                            <td class="px-6 py-4">{ category_badge(&expense.category_name, &expense.category_color) }</td>
                                                            <td class="px-6 py-4 text-right font-semibold text-slate-800">{ format_money(expense.amount, &expense.currency) }</td>
                                                            <td class="px-6 py-4">
                                                                { if receipt_count > 0 {
                                                                    html! {
                                                                        <span class="bg-sky-100 text-sky-700 px-2.5 py-1 rounded-full text-[10px] font-bold">
                                                                            { format!("{} {}", receipt_count, if receipt_count == 1 { "receipt" } else { "receipts" }) }
                                                                        </span>
                                                                    }
                                                                } else {
                                                                    html! { <span class="bg-slate-100 text-slate-500 px-2.5 py-1 rounded-full text-[10px] font-bold">{"None"}</span> }
                                                                }}
                                                            </td>
                                                            <td class="px-6 py-4">
                                                                <div class="flex gap-2">
                                                                    <button onclick={Callback::from(move |_| on_edit.emit(expense_id))}
                                                                        class="p-1.5 rounded-lg text-sky-700 hover:bg-sky-50 transition-colors" title="Edit">
                                                                        { icon_pencil() }
                                                                    </button>
                                                                    <button onclick={Callback::from(move |_| on_delete.emit(expense_id))}
                                                                        class="p-1.5 rounded-lg text-red-600 hover:bg-red-50 transition-colors" title="Delete">
                                                                        { icon_trash() }
                                                                    </button>
                                                                </div>
                                                            </td>
                                                        </tr>
                                                    }
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>
                </>
            }
        ) }
    }
}

fn files_from_input(input: &web_sys::HtmlInputElement) -> Vec<File> {
    let mut selected = Vec::new();
    if let Some(list) = input.files() {
        let mut index = 0;
        while let Some(file) = list.get(index) {
            selected.push(file);
            index += 1;
        }
    }
    selected
}

#[derive(Properties, PartialEq)]
struct ReceiptUploadPanelProps {
    on_upload: Callback<Vec<File>>,
    uploading: bool,
}

#[function_component(ReceiptUploadPanel)]
fn receipt_upload_panel(props: &ReceiptUploadPanelProps) -> Html {
    let files = use_state(Vec::<File>::new);
    let panel_error = use_state(|| None::<String>);

    let on_change = {
        let files = files.clone();
        let panel_error = panel_error.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            files.set(files_from_input(&input));
            panel_error.set(None);
        })
    };

    let on_click = {
        let files = files.clone();
        let panel_error = panel_error.clone();
        let on_upload = props.on_upload.clone();
        Callback::from(move |_| {
            if files.is_empty() {
                panel_error.set(Some("Please select at least one file to upload.".to_string()));
                return;
            }
            panel_error.set(None);
            on_upload.emit((*files).clone());
        })
    };

    html! {
        <div class="space-y-3">
            <div class="space-y-1">
                <label class="text-[12px] font-bold text-slate-500">{"Upload Receipts"}</label>
                <input type="file" multiple={true} accept="image/*,.pdf" onchange={on_change}
                    class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                <p class="text-xs text-slate-400">{"Upload images or PDF files of your receipts."}</p>
            </div>
            <button type="button" onclick={on_click} disabled={props.uploading}
                class="flex items-center gap-2 bg-[#2e4832] text-white px-4 py-2 rounded-[10px] text-sm font-bold hover:opacity-90 transition-all disabled:opacity-60">
                { icon_upload() }
                { if props.uploading { "Uploading..." } else { "Upload" } }
            </button>
            {
                if let Some(msg) = &*panel_error {
                    html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseFormPageProps {
    expense: Option<Expense>,
    categories: Vec<Category>,
    on_navigate: Callback<Page>,
}

#[function_component(ExpenseFormPage)]
fn expense_form_page(props: &ExpenseFormPageProps) -> Html {
    let notify = use_context::<Callback<Toast>>().unwrap_or_else(Callback::noop);
    let editing = props.expense.clone();
    let expense_id = editing.as_ref().map(|e| e.id);

    let form_title = use_state(|| {
        editing
            .as_ref()
            .map(|e| e.title.clone())
            .unwrap_or_default()
    });
    let form_amount = use_state(|| {
        editing
            .as_ref()
            .map(|e| e.amount.to_string())
            .unwrap_or_default()
    });
    let form_currency = use_state(|| {
        editing
            .as_ref()
            .map(|e| e.currency.clone())
            .unwrap_or_else(default_currency)
    });
    let form_date = use_state(|| {
        editing
            .as_ref()
            .map(|e| e.date.clone())
            .unwrap_or_else(today_ymd)
    });
    let form_category = use_state(|| {
        editing
            .as_ref()
            .map(|e| e.category_id.to_string())
            .unwrap_or_default()
    });
    let form_description = use_state(|| {
        editing
            .as_ref()
            .and_then(|e| e.description.clone())
            .unwrap_or_default()
    });
    let new_files = use_state(Vec::<File>::new);
    let receipts = use_state(|| {
        editing
            .as_ref()
            .map(|e| e.receipts.clone())
            .unwrap_or_default()
    });
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let uploading = use_state(|| false);

    let on_cancel = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Expenses))
    };

    let on_submit = {
        let form_title = form_title.clone();
        let form_amount = form_amount.clone();
        let form_currency = form_currency.clone();
        let form_date = form_date.clone();
        let form_category = form_category.clone();
        let form_description = form_description.clone();
        let new_files = new_files.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let notify = notify.clone();
        let on_navigate = props.on_navigate.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: web_sys::HtmlFormElement = e.target_unchecked_into();
            if !form.report_validity() {
                return;
            }

            let amount = form_amount.trim().parse::<f64>().unwrap_or(0.0);
            if amount <= 0.0 {
                form_error.set(Some("Please provide a valid amount.".to_string()));
                return;
            }
            let category_id = match form_category.parse::<i32>() {
                Ok(id) => id,
                Err(_) => {
                    form_error.set(Some("Please select a category.".to_string()));
                    return;
                }
            };

            let payload = ExpensePayload {
                title: form_title.trim().to_string(),
                amount,
                currency: (*form_currency).clone(),
                date: (*form_date).clone(),
                category_id,
                description: form_description.trim().to_string(),
            };
            let files = (*new_files).clone();

            form_error.set(None);
            saving.set(true);

            let saving = saving.clone();
            let notify = notify.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                let result = match expense_id {
                    Some(id) => update_expense(id, &payload, &[]).await,
                    None => create_expense(&payload, &files).await,
                };

                match result {
                    Ok(_) => {
                        let message = if expense_id.is_some() {
                            "Expense updated successfully"
                        } else {
                            "Expense saved successfully"
                        };
                        notify.emit(Toast::success(message));
                        on_navigate.emit(Page::Expenses);
                    }
                    Err(err) => {
                        log_error("Error saving expense", &err);
                        notify.emit(Toast::error(err.to_string()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_files_change = {
        let new_files = new_files.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            new_files.set(files_from_input(&input));
        })
    };

    let on_upload = {
        let receipts = receipts.clone();
        let uploading = uploading.clone();
        let notify = notify.clone();
        Callback::from(move |files: Vec<File>| {
            let Some(id) = expense_id else {
                return;
            };
            uploading.set(true);
            let receipts = receipts.clone();
            let uploading = uploading.clone();
            let notify = notify.clone();
            spawn_local(async move {
                match upload_receipts(id, &files).await {
                    Ok(updated) => {
                        receipts.set(updated.receipts);
                        notify.emit(Toast::success("Receipts uploaded successfully"));
                    }
                    Err(err) => {
                        log_error("Error uploading receipts", &err);
                        notify.emit(Toast::error(err.to_string()));
                    }
                }
                uploading.set(false);
            });
        })
    };

    let on_delete_receipt = {
        let receipts = receipts.clone();
        let notify = notify.clone();
        Callback::from(move |receipt_id: i32| {
            if !confirm("Are you sure you want to delete this receipt?") {
                return;
            }
            let receipts = receipts.clone();
            let notify = notify.clone();
            spawn_local(async move {
                match delete_receipt(receipt_id).await {
                    Ok(()) => {
                        let remaining: Vec<Receipt> = receipts
                            .iter()
                            .filter(|receipt| receipt.id != receipt_id)
                            .cloned()
                            .collect();
                        receipts.set(remaining);
                        notify.emit(Toast::success("Receipt deleted successfully"));
                    }
                    Err(err) => {
                        log_error("Error deleting receipt", &err);
                        notify.emit(Toast::error(err.to_string()));
                    }
                }
            });
        })
    };

    let title = if expense_id.is_some() {
        "Edit Expense"
    } else {
        "Add New Expense"
    };

    html! {
        { page_shell(
            title,
            html! {
                <button onclick={on_cancel} class="bg-slate-200 text-slate-700 px-4 py-2 rounded-xl font-bold text-sm hover:bg-slate-300 transition-all">
                    {"Cancel"}
                </button>
            },
            html! {
                <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                    <form onsubmit={on_submit} class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-slate-500">{"Title"}</label>
                            <input type="text" required={true} value={(*form_title).clone()} oninput={{
                                let form_title = form_title.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    form_title.set(input.value());
                                })
                            }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                        </div>
                        <div class="grid grid-cols-3 gap-3">
                            <div class="col-span-2 space-y-1">
                                <label class="text-[12px] font-bold text-slate-500">{"Amount"}</label>
                                <input type="number" min="0.01" step="0.01" required={true} value={(*form_amount).clone()} oninput={{
                                    let form_amount = form_amount.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        form_amount.set(input.value());
                                    })
                                }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-slate-500">{"Currency"}</label>
                                <select value={(*form_currency).clone()} onchange={{
                                    let form_currency = form_currency.clone();
                                    Callback::from(move |e: Event| {
                                        let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                        form_currency.set(input.value());
                                    })
                                }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none">
                                    { for CURRENCY_CODES.iter().map(|code| html! {
                                        <option value={*code} selected={*code == form_currency.as_str()}>{ *code }</option>
                                    }) }
                                </select>
                            </div>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-slate-500">{"Date"}</label>
                            <input type="date" required={true} value={(*form_date).clone()} oninput={{
                                let form_date = form_date.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    form_date.set(input.value());
                                })
                            }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-slate-500">{"Category"}</label>
                            <select required={true} value={(*form_category).clone()} onchange={{
                                let form_category = form_category.clone();
                                Callback::from(move |e: Event| {
                                    let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                    form_category.set(input.value());
                                })
                            }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none">
                                <option value="" disabled={true} selected={form_category.is_empty()}>{"Select a category"}</option>
                                { for props.categories.iter().map(|category| html! {
                                    <option value={category.id.to_string()} selected={category.id.to_string() == *form_category}>{ &category.name }</option>
                                }) }
                            </select>
                        </div>
                        <div class="md:col-span-2 space-y-1">
                            <label class="text-[12px] font-bold text-slate-500">{"Description"}</label>
                            <textarea rows="3" value={(*form_description).clone()} oninput={{
                                let form_description = form_description.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                    form_description.set(input.value());
                                })
                            }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none">
                            </textarea>
                        </div>
                        {
                            if expense_id.is_none() {
                                html! {
                                    <div class="md:col-span-2 space-y-1">
                                        <label class="text-[12px] font-bold text-slate-500">{"Upload Receipts"}</label>
                                        <input type="file" multiple={true} accept="image/*,.pdf" onchange={on_files_change}
                                            class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                                        <p class="text-xs text-slate-400">{"Accepted file types: Images, PDF."}</p>
                                    </div>
                                }
                            } else {
                                html! {}
                            }
                        }
                        {
                            if let Some(msg) = &*form_error {
                                html! { <p class="md:col-span-2 text-sm text-red-500">{ msg.clone() }</p> }
                            } else {
                                html! {}
                            }
                        }
                        <div class="md:col-span-2">
                            <button type="submit" disabled={*saving}
                                class="bg-[#2e4832] text-white px-6 py-2 rounded-[10px] text-sm font-bold hover:opacity-90 transition-all disabled:opacity-60">
                                { if *saving {
                                    "Saving..."
                                } else if expense_id.is_some() {
                                    "Update Expense"
                                } else {
                                    "Save Expense"
                                }}
                            </button>
                        </div>
                    </form>

                    {
                        if expense_id.is_some() {
                            html! {
                                <div class="mt-6 pt-6 border-t border-slate-200 grid grid-cols-1 md:grid-cols-2 gap-6">
                                    <div class="space-y-2">
                                        <label class="text-[12px] font-bold text-slate-500">{"Existing Receipts"}</label>
                                        { if receipts.is_empty() {
                                            html! { <p class="text-sm text-slate-500">{"No receipts uploaded yet."}</p> }
                                        } else {
                                            html! {
                                                <div class="grid grid-cols-1 sm:grid-cols-2 gap-2">
                                                    { for receipts.iter().map(|receipt| {
                                                        let on_delete_receipt = on_delete_receipt.clone();
                                                        let receipt_id = receipt.id;
                                                        html! {
                                                            <div key={receipt.id} class="bg-slate-100 rounded-[10px] p-3 space-y-2">
                                                                <div class="flex items-center justify-between gap-2">
                                                                    <span class="text-xs text-slate-700 truncate">{ &receipt.original_filename }</span>
                                                                    <button onclick={Callback::from(move |_| on_delete_receipt.emit(receipt_id))}
                                                                        class="p-1 rounded text-red-600 hover:bg-red-50 transition-colors shrink-0" title="Delete receipt">
                                                                        { icon_trash() }
                                                                    </button>
                                                                </div>
                                                                <a href={format!("/uploads/{}", receipt.filename)} target="_blank"
                                                                    class="flex items-center justify-center gap-2 bg-white text-slate-700 px-3 py-1.5 rounded-lg text-xs font-bold hover:bg-slate-50 transition-colors">
                                                                    { icon_eye() }
                                                                    {"View"}
                                                                </a>
                                                            </div>
                                                        }
                                                    }) }
                                                </div>
                                            }
                                        }}
                                    </div>
                                    <ReceiptUploadPanel on_upload={on_upload} uploading={*uploading} />
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
            }
        ) }
    }
}

#[function_component(ReportsPage)]
fn reports_page() -> Html {
    let notify = use_context::<Callback<Toast>>().unwrap_or_else(Callback::noop);
    let applied = use_state(|| (None::<String>, None::<String>));
    let draft_start = use_state(String::new);
    let draft_end = use_state(String::new);

    let monthly_rows = use_state(Vec::<MonthlyTotal>::new);
    let category_rows = use_state(Vec::<CategoryTotal>::new);
    let summary = use_state(SummaryReport::default);
    let loading = use_state(|| true);

    {
        let monthly_rows = monthly_rows.clone();
        let category_rows = category_rows.clone();
        let summary = summary.clone();
        let loading = loading.clone();
        let notify = notify.clone();

        use_effect_with_deps(
            move |range: &(Option<String>, Option<String>)| {
                let (start_date, end_date) = range.clone();
                loading.set(true);
                spawn_local(async move {
                    // one call per report endpoint, all with the same range
                    let result: ApiResult<()> = async {
                        monthly_rows.set(fetch_monthly_report(&start_date, &end_date, None).await?);
                        category_rows.set(fetch_category_report(&start_date, &end_date).await?);
                        summary.set(fetch_summary_report(&start_date, &end_date).await?);
                        Ok(())
                    }
                    .await;

                    if let Err(err) = result {
                        report_failure(&notify, "Failed to load report data", &err);
                    }
                    loading.set(false);
                });
                || ()
            },
            (*applied).clone(),
        );
    }

    let on_generate = {
        let applied = applied.clone();
        let draft_start = draft_start.clone();
        let draft_end = draft_end.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            applied.set((
                Some((*draft_start).clone()).filter(|v| !v.is_empty()),
                Some((*draft_end).clone()).filter(|v| !v.is_empty()),
            ));
        })
    };

    let mut breakdown: Vec<CategoryTotal> = (*category_rows).clone();
    breakdown.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let breakdown_total: f64 = breakdown.iter().map(|row| row.total).sum();

    html! {
        { page_shell(
            "Expense Reports",
            html! {},
            html! {
                <>
                    <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                        <h3 class="font-bold text-slate-800 text-lg mb-4">{"Report Filters"}</h3>
                        <form onsubmit={on_generate} class="grid grid-cols-1 md:grid-cols-3 gap-3 items-end">
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-slate-500">{"Start Date"}</label>
                                <input type="date" value={(*draft_start).clone()} oninput={{
                                    let draft_start = draft_start.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        draft_start.set(input.value());
                                    })
                                }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                            </div>
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-slate-500">{"End Date"}</label>
                                <input type="date" value={(*draft_end).clone()} oninput={{
                                    let draft_end = draft_end.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        draft_end.set(input.value());
                                    })
                                }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                            </div>
                            <button type="submit" class="bg-[#2e4832] text-white px-4 py-2 rounded-[10px] text-sm font-bold">{"Generate Report"}</button>
                        </form>
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                        <div class="lg:col-span-2 bg-white rounded-[10px] p-6 border border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg mb-4">{"Monthly Breakdown"}</h3>
                            { if *loading {
                                html! { <p class="text-sm text-slate-500">{"Loading..."}</p> }
                            } else {
                                monthly_bar_chart(&monthly_rows)
                            }}
                        </div>
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg mb-4">{"Category Distribution"}</h3>
                            { if *loading {
                                html! { <p class="text-sm text-slate-500">{"Loading..."}</p> }
                            } else {
                                category_distribution(&category_rows)
                            }}
                        </div>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200 text-center">
                            <p class="text-sm text-slate-500 mb-2">{"Total Expenses"}</p>
                            <h3 class="text-2xl font-bold text-slate-800">{ format_money(summary.total, DEFAULT_CURRENCY) }</h3>
                        </div>
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200 text-center">
                            <p class="text-sm text-slate-500 mb-2">{"Average Expense"}</p>
                            <h3 class="text-2xl font-bold text-slate-800">{ format_money(summary.average, DEFAULT_CURRENCY) }</h3>
                        </div>
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200 text-center">
                            <p class="text-sm text-slate-500 mb-2">{"Total Transactions"}</p>
                            <h3 class="text-2xl font-bold text-slate-800">{ summary.count }</h3>
                        </div>
                    </div>

                    <div class="bg-white rounded-[10px] border border-slate-200 overflow-hidden">
                        <div class="p-6 border-b border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg">{"Category Breakdown"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold">{"Category"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Total Amount"}</th>
                                        <th class="px-6 py-4 font-bold">{"Percentage"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-slate-100">
                                    { if breakdown.is_empty() {
                                        html! { <tr><td colspan="3" class="px-6 py-6 text-center text-slate-500">{"No data available"}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for breakdown.iter().map(|row| {
                                                    let share = share_of_total(row.total, breakdown_total);
                                                    html! {
                                                        <tr key={row.id} class="text-sm hover:bg-slate-50 transition-colors">
                                                            <td class="px-6 py-4">
                                                                <span class="px-2.5 py-1 rounded-full text-[10px] font-bold text-white"
                                                                    style={format!("background-color: {}", row.color)}>
                                                                    { &row.name }
                                                                </span>
                                                            </td>
                                                            <td class="px-6 py-4 text-right font-semibold text-slate-800">{ format_money(row.total, DEFAULT_CURRENCY) }</td>
                                                            <td class="px-6 py-4">
                                                                <div class="flex items-center gap-2">
                                                                    <div class="h-2 flex-1 bg-slate-200 rounded-full overflow-hidden">
                                                                        <div class="h-full rounded-full"
                                                                            style={format!("width: {:.1}%; background-color: {}", share, row.color)}>
                                                                        </div>
                                                                    </div>
                                                                    <span class="text-slate-500 w-14 text-right">{ format!("{:.1}%", share) }</span>
                                                                </div>
                                                            </td>
                                                        </tr>
                                                    }
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
struct BudgetsPageProps {
    on_navigate: Callback<Page>,
}

#[function_component(BudgetsPage)]
fn budgets_page(props: &BudgetsPageProps) -> Html {
    let notify = use_context::<Callback<Toast>>().unwrap_or_else(Callback::noop);
    let budgets = use_state(Vec::<Budget>::new);
    let kpis = use_state(Vec::<BudgetKpi>::new);
    let kpi_error = use_state(|| false);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);

    {
        let budgets = budgets.clone();
        let kpis = kpis.clone();
        let kpi_error = kpi_error.clone();
        let loading = loading.clone();
        let notify = notify.clone();

        use_effect_with_deps(
            move |_| {
                loading.set(true);
                spawn_local(async move {
                    match fetch_budgets().await {
                        Ok(list) => budgets.set(list),
                        Err(err) => report_failure(&notify, "Failed to load budgets", &err),
                    }

                    // the progress panel fetches its KPI data on its own
                    match fetch_budget_kpis().await {
                        Ok(list) => {
                            kpis.set(list);
                            kpi_error.set(false);
                        }
                        Err(err) => {
                            log_error("Error fetching budget KPIs", &err);
                            kpi_error.set(true);
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            *reload,
        );
    }

    let on_new = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::BudgetForm(None)))
    };

    let on_edit = {
        let on_navigate = props.on_navigate.clone();
        let notify = notify.clone();
        Callback::from(move |budget_id: i32| {
            let on_navigate = on_navigate.clone();
            let notify = notify.clone();
            spawn_local(async move {
                match fetch_budget(budget_id).await {
                    Ok(budget) => on_navigate.emit(Page::BudgetForm(Some(budget))),
                    Err(err) => report_failure(&notify, "Failed to load budget details", &err),
                }
            });
        })
    };

    let on_delete = {
        let notify = notify.clone();
        let reload = reload.clone();
        Callback::from(move |budget_id: i32| {
            if !confirm("Are you sure you want to delete this budget?") {
                return;
            }
            let notify = notify.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match delete_budget(budget_id).await {
                    Ok(()) => {
                        notify.emit(Toast::success("Budget deleted successfully"));
                        reload.set(*reload + 1);
                    }
                    Err(err) => {
                        log_error("Error deleting budget", &err);
                        notify.emit(Toast::error(err.to_string()));
                    }
                }
            });
        })
    };

    let has_active_budgets = budgets.iter().any(|budget| budget.is_active);

    html! {
        { page_shell(
            "Budget Management",
            html! {
                <button onclick={on_new} class="flex items-center gap-2 bg-[#2e4832] text-white px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                    { icon_plus() }
                    {"New Budget"}
                </button>
            },
            html! {
                <>
                    <div class="bg-white rounded-[10px] border border-slate-200 overflow-hidden">
                        <div class="p-6 border-b border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg">{"Your Budgets"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold">{"Name"}</th>
                                        <th class="px-6 py-4 font-bold">{"Category"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Amount"}</th>
                                        <th class="px-6 py-4 font-bold">{"Period"}</th>
                                        <th class="px-6 py-4 font-bold">{"Status"}</th>
                                        <th class="px-6 py-4 font-bold">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-slate-100">
                                    { if *loading {
                                        html! { <tr><td colspan="6" class="px-6 py-6 text-center text-slate-500">{"Loading..."}</td></tr> }
                                    } else if budgets.is_empty() {
                                        html! { <tr><td colspan="6" class="px-6 py-6 text-center text-slate-500">{"No budgets found. Click \"New Budget\" to create one."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for budgets.iter().map(|budget| {
                                                    let on_edit = on_edit.clone();
                                                    let on_delete = on_delete.clone();
                                                    let budget_id = budget.id;
                                                    html! {
                                                        <tr key={budget.id} class="text-sm hover:bg-slate-50 transition-colors">
                                                            <td class="px-6 py-4 text-slate-800 font-medium">{ &budget.name }</td>
                                                            <td class="px-6 py-4">
                                                                { if budget.category_id.is_some() {
                                                                    category_badge(&budget.category_name, &budget.category_color)
                                                                } else {
                                                                    html! { <span class="bg-slate-100 text-slate-500 px-2.5 py-1 rounded-full text-[10px] font-bold">{"All Categories"}</span> }
                                                                }}
                                                            </td>
                                                            <td class="px-6 py-4 text-right font-semibold text-slate-800">{ format_money(budget.amount, DEFAULT_CURRENCY) }</td>
                                                            <td class="px-6 py-4 text-slate-500">{ format!("{} to {}", budget.start_date, budget.end_date) }</td>
                                                            <td class="px-6 py-4">
                                                                { if budget.is_active {
                                                                    html! { <span class="bg-emerald-100 text-emerald-700 px-2.5 py-1 rounded-full text-[10px] font-bold">{"Active"}</span> }
                                                                } else {
                                                                    html! { <span class="bg-slate-100 text-slate-500 px-2.5 py-1 rounded-full text-[10px] font-bold">{"Inactive"}</span> }
                                                                }}
                                                            </td>
                                                            <td class="px-6 py-4">
                                                                <div class="flex gap-2">
                                                                    <button onclick={Callback::from(move |_| on_edit.emit(budget_id))}
                                                                        class="p-1.5 rounded-lg text-sky-700 hover:bg-sky-50 transition-colors" title="Edit">
                                                                        { icon_pencil() }
                                                                    </button>
                                                                    <button onclick={Callback::from(move |_| on_delete.emit(budget_id))}
                                                                        class="p-1.5 rounded-lg text-red-600 hover:bg-red-50 transition-colors" title="Delete">
                                                                        { icon_trash() }
                                                                    </button>
                                                                </div>
                                                            </td>
                                                        </tr>
                                                    }
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg mb-4">{"Budget Progress"}</h3>
                            { if *kpi_error {
                                html! { <p class="text-sm text-red-600 text-center">{"Error loading budget data"}</p> }
                            } else if !has_active_budgets {
                                html! { <p class="text-sm text-slate-500 text-center">{"No active budgets to display"}</p> }
                            } else if kpis.is_empty() {
                                html! { <p class="text-sm text-slate-500 text-center">{"No budget data available"}</p> }
                            } else {
                                html! {
                                    <div class="space-y-5">
                                        { for kpis.iter().map(|kpi| budget_kpi_row(kpi)) }
                                    </div>
                                }
                            }}
                        </div>
                        <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                            <h3 class="font-bold text-slate-800 text-lg mb-4">{"Budget Tips"}</h3>
                            <ul class="space-y-3">
                                { for [
                                    "Create budgets for different spending categories",
                                    "Set monthly or custom period budgets",
                                    "Track your progress towards financial goals",
                                    "Adjust budgets as your financial situation changes",
                                ].iter().map(|tip| html! {
                                    <li class="flex items-center gap-2 text-sm text-slate-600">
                                        <span class="text-emerald-600 shrink-0">{ icon_leaf() }</span>
                                        { *tip }
                                    </li>
                                }) }
                            </ul>
                        </div>
                    </div>
                </>
            }
        ) }
    }
}

fn budget_kpi_row(kpi: &BudgetKpi) -> Html {
    let scope = kpi
        .category_name
        .clone()
        .unwrap_or_else(|| "All Categories".to_string());

    html! {
        <div class="space-y-1">
            <div class="flex items-center justify-between text-sm">
                <span class="text-slate-700 font-medium">{ format!("{} ({})", kpi.budget_name, scope) }</span>
                { if kpi.is_exceeded {
                    html! { <span class="bg-red-100 text-red-700 px-2.5 py-1 rounded-full text-[10px] font-bold">{"EXCEEDED"}</span> }
                } else {
                    html! { <span class="bg-emerald-100 text-emerald-700 px-2.5 py-1 rounded-full text-[10px] font-bold">{"ON TRACK"}</span> }
                }}
            </div>
            <div class="flex items-center justify-between text-xs text-slate-500">
                <span>{ format!("Budget: {}", format_money(kpi.budget_amount, DEFAULT_CURRENCY)) }</span>
                <span>{ format!("Spent: {}", format_money(kpi.total_spent, DEFAULT_CURRENCY)) }</span>
            </div>
            <div class="h-4 w-full bg-slate-200 rounded-full overflow-hidden">
                <div class={format!("h-full rounded-full flex items-center justify-end pr-2 {}", progress_tone(kpi.percentage_used))}
                    style={format!("width: {:.1}%", progress_width(kpi.percentage_used))}>
                    <span class="text-[9px] font-bold text-white">{ format!("{:.1}%", kpi.percentage_used) }</span>
                </div>
            </div>
            <div class="flex items-center justify-between text-xs text-slate-500">
                <span>{ format!("Remaining: {}", format_money(kpi.remaining, DEFAULT_CURRENCY)) }</span>
                <span>{ format!("{} - {}", kpi.start_date, kpi.end_date) }</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct BudgetFormPageProps {
    budget: Option<Budget>,
    categories: Vec<Category>,
    on_navigate: Callback<Page>,
}

#[function_component(BudgetFormPage)]
fn budget_form_page(props: &BudgetFormPageProps) -> Html {
    let notify = use_context::<Callback<Toast>>().unwrap_or_else(Callback::noop);
    let editing = props.budget.clone();
    let budget_id = editing.as_ref().map(|b| b.id);

    let form_name = use_state(|| editing.as_ref().map(|b| b.name.clone()).unwrap_or_default());
    let form_amount = use_state(|| {
        editing
            .as_ref()
            .map(|b| b.amount.to_string())
            .unwrap_or_default()
    });
    let form_start = use_state(|| {
        editing
            .as_ref()
            .map(|b| b.start_date.clone())
            .unwrap_or_else(first_day_of_month)
    });
    let form_end = use_state(|| {
        editing
            .as_ref()
            .map(|b| b.end_date.clone())
            .unwrap_or_else(last_day_of_month)
    });
    let form_category = use_state(|| {
        editing
            .as_ref()
            .and_then(|b| b.category_id)
            .map(|id| id.to_string())
            .unwrap_or_default()
    });
    let form_active = use_state(|| editing.as_ref().map(|b| b.is_active).unwrap_or(true));
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let current_kpi = use_state(|| None::<BudgetKpi>);

    {
        let current_kpi = current_kpi.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(id) = budget_id {
                    spawn_local(async move {
                        match fetch_budget_kpi(id).await {
                            Ok(kpi) => current_kpi.set(Some(kpi)),
                            Err(err) => log_error("Error fetching budget KPIs", &err),
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let on_cancel = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_| on_navigate.emit(Page::Budgets))
    };

    let on_submit = {
        let form_name = form_name.clone();
        let form_amount = form_amount.clone();
        let form_start = form_start.clone();
        let form_end = form_end.clone();
        let form_category = form_category.clone();
        let form_active = form_active.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let notify = notify.clone();
        let on_navigate = props.on_navigate.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form: web_sys::HtmlFormElement = e.target_unchecked_into();
            if !form.report_validity() {
                return;
            }

            let amount = form_amount.trim().parse::<f64>().unwrap_or(0.0);
            if amount <= 0.0 {
                form_error.set(Some("Please provide a valid amount.".to_string()));
                return;
            }

            let payload = BudgetPayload {
                name: form_name.trim().to_string(),
                amount,
                start_date: (*form_start).clone(),
                end_date: (*form_end).clone(),
                category_id: form_category.parse::<i32>().ok(),
                is_active: *form_active,
            };

            form_error.set(None);
            saving.set(true);

            let saving = saving.clone();
            let notify = notify.clone();
            let on_navigate = on_navigate.clone();
            spawn_local(async move {
                let result = match budget_id {
                    Some(id) => update_budget(id, &payload).await,
                    None => create_budget(&payload).await,
                };

                match result {
                    Ok(_) => {
                        let message = if budget_id.is_some() {
                            "Budget updated successfully"
                        } else {
                            "Budget created successfully"
                        };
                        notify.emit(Toast::success(message));
                        on_navigate.emit(Page::Budgets);
                    }
                    Err(err) => {
                        log_error("Error saving budget", &err);
                        notify.emit(Toast::error(err.to_string()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let title = if budget_id.is_some() {
        "Edit Budget"
    } else {
        "Create New Budget"
    };

    html! {
        { page_shell(
            title,
            html! {
                <button onclick={on_cancel} class="bg-slate-200 text-slate-700 px-4 py-2 rounded-xl font-bold text-sm hover:bg-slate-300 transition-all">
                    {"Cancel"}
                </button>
            },
            html! {
                <div class="bg-white rounded-[10px] p-6 border border-slate-200">
                    <form onsubmit={on_submit} class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-slate-500">{"Budget Name"}</label>
                            <input type="text" required={true} value={(*form_name).clone()} oninput={{
                                let form_name = form_name.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    form_name.set(input.value());
                                })
                            }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-slate-500">{ format!("Budget Amount ({})", DEFAULT_CURRENCY) }</label>
                            <input type="number" min="0.01" step="0.01" required={true} value={(*form_amount).clone()} oninput={{
                                let form_amount = form_amount.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    form_amount.set(input.value());
                                })
                            }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-slate-500">{"Start Date"}</label>
                            <input type="date" required={true} value={(*form_start).clone()} oninput={{
                                let form_start = form_start.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    form_start.set(input.value());
                                })
                            }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-slate-500">{"End Date"}</label>
                            <input type="date" required={true} value={(*form_end).clone()} oninput={{
                                let form_end = form_end.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    form_end.set(input.value());
                                })
                            }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none" />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-slate-500">{"Category"}</label>
                            <select value={(*form_category).clone()} onchange={{
                                let form_category = form_category.clone();
                                Callback::from(move |e: Event| {
                                    let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                    form_category.set(input.value());
                                })
                            }} class="w-full bg-slate-100 rounded-[10px] px-3 py-2 text-sm text-slate-700 border-none">
                                <option value="" selected={form_category.is_empty()}>{"All Categories"}</option>
                                { for props.categories.iter().map(|category| html! {
                                    <option value={category.id.to_string()} selected={category.id.to_string() == *form_category}>{ &category.name }</option>
                                }) }
                            </select>
                            <p class="text-xs text-slate-400">{"Select a specific category or leave as \"All Categories\" for overall budget."}</p>
                        </div>
                        <div class="flex items-center gap-2 mt-6">
                            <input type="checkbox" id="budget-active" checked={*form_active} onchange={{
                                let form_active = form_active.clone();
                                Callback::from(move |e: Event| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    form_active.set(input.checked());
                                })
                            }} class="w-4 h-4 accent-[#2e4832]" />
                            <label for="budget-active" class="text-sm text-slate-700">{"Active Budget"}</label>
                        </div>
                        {
                            if let Some(msg) = &*form_error {
                                html! { <p class="md:col-span-2 text-sm text-red-500">{ msg.clone() }</p> }
                            } else {
                                html! {}
                            }
                        }
                        <div class="md:col-span-2">
                            <button type="submit" disabled={*saving}
                                class="bg-[#2e4832] text-white px-6 py-2 rounded-[10px] text-sm font-bold hover:opacity-90 transition-all disabled:opacity-60">
                                { if *saving {
                                    "Saving..."
                                } else if budget_id.is_some() {
                                    "Update Budget"
                                } else {
                                    "Create Budget"
                                }}
                            </button>
                        </div>
                    </form>

                    {
                        if let Some(kpi) = &*current_kpi {
                            html! {
                                <div class="mt-6 pt-6 border-t border-slate-200">
                                    <h4 class="text-[12px] font-bold text-slate-500 mb-3">{"Current Usage"}</h4>
                                    { budget_kpi_row(kpi) }
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>
            }
        ) }
    }
}

#[function_component(App)]
fn app() -> Html {
    let active_page = use_state(|| Page::Dashboard);
    let categories = use_state(Vec::<Category>::new);
    let toast = use_state(|| None::<Toast>);
    let toast_seq = use_mut_ref(|| 0u32);

    let notify = {
        let toast = toast.clone();
        Callback::from(move |incoming: Toast| {
            let id = {
                let mut seq = toast_seq.borrow_mut();
                *seq += 1;
                *seq
            };
            toast.set(Some(incoming));

            // auto-dismiss unless a newer toast has replaced this one
            let toast = toast.clone();
            let toast_seq = toast_seq.clone();
            Timeout::new(4_000, move || {
                if *toast_seq.borrow() == id {
                    toast.set(None);
                }
            })
            .forget();
        })
    };

    // reference data shared by every view with a category select
    {
        let categories = categories.clone();
        let notify = notify.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match fetch_categories().await {
                        Ok(list) => categories.set(list),
                        Err(err) => report_failure(&notify, "Failed to load categories", &err),
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_navigate = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    let content = match &*active_page {
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Expenses => html! {
            <ExpensesPage categories={(*categories).clone()} on_navigate={on_navigate.clone()} />
        },
        Page::ExpenseForm(expense) => {
            let key = expense
                .as_ref()
                .map(|e| format!("expense-{}", e.id))
                .unwrap_or_else(|| "expense-new".to_string());
            html! {
                <ExpenseFormPage key={key} expense={expense.clone()}
                    categories={(*categories).clone()} on_navigate={on_navigate.clone()} />
            }
        }
        Page::Reports => html! { <ReportsPage /> },
        Page::Budgets => html! { <BudgetsPage on_navigate={on_navigate.clone()} /> },
        Page::BudgetForm(budget) => {
            let key = budget
                .as_ref()
                .map(|b| format!("budget-{}", b.id))
                .unwrap_or_else(|| "budget-new".to_string());
            html! {
                <BudgetFormPage key={key} budget={budget.clone()}
                    categories={(*categories).clone()} on_navigate={on_navigate.clone()} />
            }
        }
    };

    let on_dismiss = {
        let toast = toast.clone();
        Callback::from(move |_| toast.set(None))
    };

    html! {
        <ContextProvider<Callback<Toast>> context={notify}>
            <Layout active_page={(*active_page).clone()} on_select={on_navigate.clone()}>
                { content }
            </Layout>
            {
                if let Some(current) = &*toast {
                    let tone = match current.kind {
                        ToastKind::Success => "bg-emerald-600",
                        ToastKind::Error => "bg-red-600",
                    };
                    html! {
                        <div class="fixed bottom-6 right-6 z-50">
                            <div class={format!("{} text-white px-4 py-3 rounded-xl shadow-lg flex items-center gap-3 text-sm", tone)}>
                                <span>{ &current.message }</span>
                                <button onclick={on_dismiss} class="opacity-80 hover:opacity-100" aria-label="Close">
                                    { icon_x() }
                                </button>
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </ContextProvider<Callback<Toast>>>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_leaf() -> Html {
    icon_base("M11 20A7 7 0 014 13c0-4 3-9 13-9 3 0 5 0 5 2 0 10-5 14-11 14zM4 21c3-6 7-9 12-11")
}
fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
fn icon_list() -> Html {
    icon_base("M8 6h13M8 12h13M8 18h13M3 6h.01M3 12h.01M3 18h.01")
}
fn icon_plus_circle() -> Html {
    icon_base("M12 12m-9 0a9 9 0 1018 0 9 9 0 10-18 0M12 8v8M8 12h8")
}
fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
fn icon_target() -> Html {
    icon_base("M12 12m-9 0a9 9 0 1018 0 9 9 0 10-18 0M12 12m-4 0a4 4 0 108 0 4 4 0 10-8 0")
}
fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
fn icon_pencil() -> Html {
    icon_base("M17 3a2.85 2.85 0 114 4L7.5 20.5 2 22l1.5-5.5z")
}
fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6M10 11v6M14 11v6")
}
fn icon_eye() -> Html {
    icon_base("M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8zM12 12m-3 0a3 3 0 106 0 3 3 0 10-6 0")
}
fn icon_upload() -> Html {
    icon_base("M21 15v4a2 2 0 01-2 2H5a2 2 0 01-2-2v-4M17 8l-5-5-5 5M12 3v12")
}
fn icon_refresh() -> Html {
    icon_base("M21 2v6h-6M3 12a9 9 0 0115-6.7L21 8M3 22v-6h6M21 12a9 9 0 01-15 6.7L3 16")
}
fn icon_x() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}

fn main() {
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_expense() -> Expense {
        Expense {
            id: 7,
            title: "Coffee".to_string(),
            amount: 4.5,
            currency: "USD".to_string(),
            date: "2024-01-05".to_string(),
            description: Some("Morning espresso".to_string()),
            category_id: 3,
            category_name: Some("Food & Dining".to_string()),
            category_color: Some("#FF5733".to_string()),
            category_icon: Some("utensils".to_string()),
            receipts: vec![],
        }
    }

    #[test]
    fn query_omits_null_parameters() {
        let query = query_from_pairs(&[
            ("start_date", Some("2024-01-01".to_string())),
            ("end_date", None),
            ("category_id", Some("3".to_string())),
        ]);
        assert_eq!(query, "start_date=2024-01-01&category_id=3");
    }

    #[test]
    fn query_is_empty_when_all_parameters_are_null() {
        assert_eq!(query_from_pairs(&[("start_date", None), ("year", None)]), "");
    }

    #[test]
    fn default_filters_query_carries_only_sort_parameters() {
        let filters = ExpenseFilters::default();
        assert_eq!(filters.query_string(), "sort_by=date&sort_order=desc");
    }

    #[test]
    fn full_filters_query_contains_every_parameter() {
        let filters = ExpenseFilters {
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
            category_id: Some(3),
            sort_by: SortBy::Amount,
            sort_order: SortOrder::Asc,
        };
        assert_eq!(
            filters.query_string(),
            "start_date=2024-01-01&end_date=2024-01-31&category_id=3&sort_by=amount&sort_order=asc"
        );
    }

    #[test]
    fn report_query_includes_year_only_when_present() {
        assert_eq!(report_query(&None, &None, Some(2024)), "year=2024");
        assert_eq!(
            report_query(&Some("2024-01-01".to_string()), &Some("2024-01-31".to_string()), None),
            "start_date=2024-01-01&end_date=2024-01-31"
        );
    }

    #[test]
    fn sort_options_parse_to_field_and_order() {
        assert!(matches!(
            parse_sort_option("date-desc"),
            (SortBy::Date, SortOrder::Desc)
        ));
        assert!(matches!(
            parse_sort_option("amount-asc"),
            (SortBy::Amount, SortOrder::Asc)
        ));
        assert!(matches!(
            parse_sort_option("title-desc"),
            (SortBy::Title, SortOrder::Desc)
        ));
    }

    #[test]
    fn unknown_sort_option_falls_back_to_newest_first() {
        assert!(matches!(
            parse_sort_option("garbage"),
            (SortBy::Date, SortOrder::Desc)
        ));
    }

    #[test]
    fn sort_option_value_round_trips() {
        for (value, _) in SORT_OPTIONS {
            let (sort_by, sort_order) = parse_sort_option(value);
            assert_eq!(sort_option_value(sort_by, sort_order), value);
        }
    }

    #[test]
    fn amounts_are_grouped_with_two_decimals() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(4.5), "4.50");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1_000_000.0), "1,000,000.00");
        assert_eq!(format_amount(-42.4), "-42.40");
    }

    #[test]
    fn amount_rounding_carries_into_the_next_group() {
        assert_eq!(format_amount(999.999), "1,000.00");
    }

    #[test]
    fn money_is_prefixed_with_the_currency_code() {
        assert_eq!(format_money(4.5, "USD"), "USD 4.50");
        assert_eq!(format_money(1250.0, "MYR"), "MYR 1,250.00");
    }

    #[test]
    fn bar_heights_are_relative_to_the_tallest_bar() {
        let heights = bar_heights(&[50.0, 100.0, 25.0]);
        assert_eq!(heights, vec![50.0, 100.0, 25.0]);
    }

    #[test]
    fn bar_heights_handle_empty_and_zero_data() {
        assert!(bar_heights(&[]).is_empty());
        assert_eq!(bar_heights(&[0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn category_share_is_zero_without_a_total() {
        assert_eq!(share_of_total(10.0, 0.0), 0.0);
        assert_eq!(share_of_total(25.0, 100.0), 25.0);
    }

    #[test]
    fn progress_width_is_clamped_but_percentage_is_not() {
        let kpi = BudgetKpi {
            budget_id: 1,
            budget_name: "Groceries".to_string(),
            category_name: Some("Food & Dining".to_string()),
            budget_amount: 100.0,
            total_spent: 150.0,
            remaining: -50.0,
            percentage_used: 150.0,
            is_exceeded: true,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
        };
        assert_eq!(
            kpi.percentage_used,
            kpi.total_spent / kpi.budget_amount * 100.0
        );
        assert_eq!(progress_width(kpi.percentage_used), 100.0);
        assert_eq!(format!("{:.1}%", kpi.percentage_used), "150.0%");
    }

    #[test]
    fn progress_width_stays_within_the_track() {
        assert_eq!(progress_width(-5.0), 0.0);
        assert_eq!(progress_width(42.0), 42.0);
        assert_eq!(progress_width(100.0), 100.0);
    }

    #[test]
    fn progress_tone_switches_above_the_thresholds() {
        assert_eq!(progress_tone(75.0), "bg-emerald-600");
        assert_eq!(progress_tone(75.1), "bg-amber-500");
        assert_eq!(progress_tone(90.0), "bg-amber-500");
        assert_eq!(progress_tone(90.1), "bg-red-600");
    }

    #[test]
    fn february_respects_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn month_lengths_match_the_calendar() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn dates_are_zero_padded() {
        assert_eq!(format_ymd(2024, 1, 5), "2024-01-05");
        assert_eq!(format_ymd(2024, 11, 30), "2024-11-30");
    }

    #[test]
    fn month_labels_shorten_to_three_letters() {
        assert_eq!(short_month("January"), "Jan");
        assert_eq!(short_month("May"), "May");
    }

    #[test]
    fn expense_form_entries_cover_every_scalar_field() {
        let payload = ExpensePayload {
            title: "Coffee".to_string(),
            amount: 4.5,
            currency: "USD".to_string(),
            date: "2024-01-05".to_string(),
            category_id: 3,
            description: String::new(),
        };
        let entries = expense_form_entries(&payload);
        let keys: Vec<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(
            keys,
            vec!["title", "amount", "currency", "date", "category_id", "description"]
        );
        assert!(!keys.contains(&"id"));
        assert!(!keys.contains(&"receipts"));
        assert_eq!(entries[1].1, "4.5");
        assert_eq!(entries[4].1, "3");
    }

    #[test]
    fn expense_currency_defaults_when_the_server_omits_it() {
        let json = r##"{
            "id": 7,
            "title": "Coffee",
            "amount": 4.5,
            "date": "2024-01-05",
            "description": null,
            "category_id": 3,
            "category_name": "Food & Dining",
            "category_color": "#FF5733",
            "category_icon": "utensils",
            "receipts": []
        }"##;
        let expense: Expense = serde_json::from_str(json).expect("expense should deserialize");
        assert_eq!(expense.currency, DEFAULT_CURRENCY);
        assert!(expense.receipts.is_empty());
    }

    #[test]
    fn receipts_deserialize_inside_their_expense() {
        let json = r#"{
            "id": 7,
            "title": "Coffee",
            "amount": 4.5,
            "currency": "EUR",
            "date": "2024-01-05",
            "category_id": 3,
            "receipts": [
                {"id": 1, "filename": "ab12.png", "original_filename": "receipt.png",
                 "upload_date": "2024-01-05", "expense_id": 7}
            ]
        }"#;
        let expense: Expense = serde_json::from_str(json).expect("expense should deserialize");
        assert_eq!(expense.currency, "EUR");
        assert_eq!(expense.receipts.len(), 1);
        assert_eq!(expense.receipts[0].original_filename, "receipt.png");
        assert_eq!(expense.receipts[0].expense_id, expense.id);
    }

    #[test]
    fn overall_budget_serializes_a_null_category() {
        let payload = BudgetPayload {
            name: "Everything".to_string(),
            amount: 500.0,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
            category_id: None,
            is_active: true,
        };
        let value = serde_json::to_value(&payload).expect("payload should serialize");
        assert!(value["category_id"].is_null());
        assert_eq!(value["is_active"], serde_json::json!(true));
    }

    #[test]
    fn category_payload_serializes_every_field() {
        let payload = CategoryPayload {
            name: "Gardening".to_string(),
            color: "#2e7d32".to_string(),
            icon: "leaf".to_string(),
        };
        let value = serde_json::to_value(&payload).expect("payload should serialize");
        assert_eq!(value["name"], "Gardening");
        assert_eq!(value["color"], "#2e7d32");
        assert_eq!(value["icon"], "leaf");
    }

    #[test]
    fn summary_report_tolerates_a_sparse_body() {
        let report: SummaryReport =
            serde_json::from_str(r#"{"total": 12.5, "count": 2}"#).expect("should deserialize");
        assert_eq!(report.total, 12.5);
        assert_eq!(report.count, 2);
        assert_eq!(report.average, 0.0);
        assert!(report.recent_expenses.is_empty());
    }

    #[test]
    fn form_pages_highlight_their_sidebar_entry() {
        assert!(nav_matches(
            &Page::ExpenseForm(None),
            &Page::ExpenseForm(Some(sample_expense()))
        ));
        assert!(nav_matches(&Page::Budgets, &Page::BudgetForm(None)));
        assert!(!nav_matches(&Page::Expenses, &Page::ExpenseForm(None)));
        assert!(!nav_matches(&Page::Dashboard, &Page::Reports));
    }

    #[test]
    fn api_errors_render_their_server_message() {
        let err = ApiError::Server("Category not found".to_string());
        assert_eq!(err.to_string(), "Category not found");
        let err = ApiError::Network("timed out".to_string());
        assert_eq!(err.to_string(), "network error: timed out");
    }
}
