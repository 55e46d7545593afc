use crate::endpoint::endpoint_group;

endpoint_group! {
    /// General ledger accounts and journal entries.
    pub struct Accounting;
    table ACCOUNTING_ENDPOINTS;

    /// Create a general ledger account.
    fn create_general_ledger_account => POST "/ledger",
        body ["name", "glCode", "manualEntriesAllowed", "type", "usage", "parentId", "description"];
    /// List every general ledger account.
    fn retrieve_all_general_ledger_accounts => GET "/ledger";
    /// Retrieve one general ledger account by `glAccountId`.
    fn retrieve_general_ledger_account => GET "/ledger/{glAccountId}";
    /// Post a balanced journal entry between ledger accounts.
    fn ledger_to_ledger => POST "/journalentries",
        body ["officeId", "transactionDate", "credits", "debits", "currencyCode", "comments"];
    /// Reverse a journal entry.
    fn reverse_journal_entry => POST "/journalentries/{journalEntryId}/reverse",
        body ["comments"];
    /// Post between customer accounts and ledger accounts.
    fn customer_to_ledger => POST "/accountgl",
        body [
            "officeId",
            "transactionDate",
            "currencyCode",
            "credits",
            "debits",
            "operationType",
            "referenceNumber",
            "customerAccounts",
            "comments",
        ];
    /// List journal entries.
    fn retrieve_all_journal_entries, pages retrieve_all_journal_entry_pages => GET "/journalentries",
        query ["perPage", "page"];
    /// Retrieve one journal entry.
    fn retrieve_journal_entry => GET "/journalentries/{journalEntryId}",
        query ["runningBalance", "transactionDetails"];
}
